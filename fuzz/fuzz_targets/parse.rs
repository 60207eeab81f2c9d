#![no_main]
use dynjson::{normalize, DynamicNode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(node) = DynamicNode::from_slice(data) {
        let again = DynamicNode::parse(&node.to_string()).expect("Serialized output is valid JSON");
        assert_eq!(node.source(), again.source());
        for key in node.keys() {
            assert!(node.get(key).is_some());
            let _ = node.get(&normalize(key));
        }
    }
});
