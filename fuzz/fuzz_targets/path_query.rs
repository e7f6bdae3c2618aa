#![no_main]
use libfuzzer_sys::fuzz_target;
use ztree::{Node, QueryConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let root = Node::document();
        let item = Node::element("item");
        if root.add_child(item.clone()).is_ok() && item.add_child(Node::element("sub")).is_ok() {
            let _ = item.nodes_for_path(path);
            let _ = item.nodes_for_path_with_config(path, &QueryConfig::lenient());
        }
    }
});
