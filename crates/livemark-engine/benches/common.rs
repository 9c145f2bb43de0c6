// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and `code`.\n\n- Bullet with [[Wiki Page|a link]]\n  - Nested [item](https://example.com)\n- [x] Finished task\n- [ ] Open task\n\n> [!note] Remember\n> Quoted line with $x^2$\n\n$$\\sum_i a_i$$ then ~~gone~~\n\n";
    base.repeat(size)
}
