#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Build a tree from arbitrary whitespace-separated documents, then run
    // both query modes over the same chunks. Exercises construction, the
    // aggregation pass, and the traversals together.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut tree = sufidx::GeneralizedSuffixTree::new();
    for (id, chunk) in text.split_whitespace().take(16).enumerate() {
        let _ = tree.insert(chunk, id as u32);
    }
    tree.aggregate();

    for chunk in text.split_whitespace().take(4) {
        let _ = tree.search(chunk);
        let _ = tree.similar(chunk, 0.5);
    }
});
