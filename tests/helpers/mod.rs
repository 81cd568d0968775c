pub mod annotated_source;

use breakname::ide::SyntacticNameSource;
use tokio_util::sync::CancellationToken;

/// Parse an annotated source, resolve its selection, and render the
/// breakpoint name with the syntactic metadata-name source.
pub async fn function_breakpoint_name(annotated: &str) -> Option<String> {
    let (source, selection) = annotated_source::parse_annotated(annotated);
    let parsed = breakname::parse(&source);
    assert!(parsed.ok(), "parse errors in test source: {:?}", parsed.errors);
    breakname::breakpoint_name(
        &parsed.syntax(),
        selection,
        &SyntacticNameSource,
        &CancellationToken::new(),
    )
    .await
    .expect("metadata name lookup failed")
}

/// Assert that the annotated selection resolves (or does not resolve) to the
/// expected breakpoint name.
pub async fn assert_breakpoint_name(annotated: &str, expected: Option<&str>) {
    assert_eq!(
        function_breakpoint_name(annotated).await.as_deref(),
        expected,
        "for annotated source: {annotated}"
    );
}
