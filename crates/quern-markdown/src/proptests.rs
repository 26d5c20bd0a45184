//! Property-based tests for the markdown pipeline.

#[allow(clippy::unwrap_used)]
mod tests {
    use crate::heading::slug;
    use crate::render::render;
    use crate::scanner::scan;
    use proptest::prelude::*;

    proptest! {
        /// Token lexemes concatenate back to the exact input.
        #[test]
        fn test_scanner_lexemes_reproduce_input(source in "[ -~\näöü€]{0,200}") {
            let tokens = scan(&source).unwrap();
            let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
            prop_assert_eq!(joined, source);
        }

        /// Scanning never panics on arbitrary unicode.
        #[test]
        fn test_scanner_total_on_unicode(source in "\\PC{0,100}") {
            let _ = scan(&source);
        }

        /// The slug function is idempotent: its output contains no
        /// uppercase letters and no spaces, so slugging twice is a no-op.
        #[test]
        fn test_slug_idempotent(text in "\\PC{0,80}") {
            let once = slug(&text);
            prop_assert_eq!(slug(&once), once.clone());
        }

        /// Rendering a tree twice yields byte-identical output.
        #[test]
        fn test_render_idempotent(source in "[a-zA-Z0-9 *_`#|.,:\\-\n]{0,160}") {
            if let Ok(tree) = scan(&source).and_then(crate::parser::parse) {
                prop_assert_eq!(render(&tree), render(&tree));
            }
        }
    }
}
