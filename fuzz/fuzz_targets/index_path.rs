#![no_main]
use libfuzzer_sys::fuzz_target;
use ztree::Node;

// Interpret the input as a stream of index-path writes against a small tree.
fuzz_target!(|data: &[u8]| {
    let root = Node::document();
    for chunk in data.chunks(3) {
        let path: Vec<usize> = chunk.iter().skip(1).map(|b| usize::from(b % 4)).collect();
        let value = match chunk.first() {
            Some(op) if op % 2 == 0 => Some(Node::element("n")),
            _ => None,
        };
        let _ = root.write_at(&path, value);
    }
});
