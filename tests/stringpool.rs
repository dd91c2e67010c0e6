//! String pool integration tests.
//!
//! Builds pools the way a table build does, flattens them in both encodings and reads the
//! chunk back through [`StringPoolView`].

use resforge::prelude::*;

fn styled(text: &str, spans: &[(&str, u32, u32)]) -> StyleString {
    StyleString {
        text: text.to_string(),
        spans: spans
            .iter()
            .map(|(name, first, last)| StyleSpan::new(*name, *first, *last))
            .collect(),
    }
}

fn assert_pool_matches(pool: &StringPool, utf8: bool) -> Result<()> {
    let bytes = StringPool::flatten(pool, utf8)?;
    let view = StringPoolView::from(&bytes)?;

    assert_eq!(view.is_utf8(), utf8);
    assert_eq!(view.len(), pool.len());
    for entry in pool.iter() {
        let expected = String::from_utf16_lossy(entry.value().as_slice());
        assert_eq!(view.get(entry.index())?, expected);
    }

    for style in pool.styles() {
        let spans = view.spans(style.str().index())?;
        assert_eq!(spans.len(), style.spans().len());
        for ((name, first, last), span) in spans.into_iter().zip(style.spans()) {
            assert_eq!(name as usize, span.name.index());
            assert_eq!(first, span.first_char);
            assert_eq!(last, span.last_char);
        }
    }
    Ok(())
}

#[test]
fn test_mixed_pool_survives_both_encodings() -> Result<()> {
    let mut pool = StringPool::new();
    let _title = pool.make_ref("Title");
    let _path = pool.make_ref_with_context(
        "res/drawable-hdpi-v4/icon.png",
        Context::with_priority(Context::HIGH_PRIORITY),
    );
    let _unicode = pool.make_ref("Grüße, 世界");
    let _style = pool.make_style_ref(&styled("Hello world", &[("b", 0, 4), ("i", 6, 10)]));
    pool.sort_by_context();

    assert_pool_matches(&pool, true)?;
    assert_pool_matches(&pool, false)?;
    Ok(())
}

#[test]
fn test_prune_then_flatten() -> Result<()> {
    let mut pool = StringPool::new();
    let kept = pool.make_ref("kept");
    {
        let _dropped = pool.make_ref("dropped");
    }
    pool.prune();

    assert_eq!(pool.len(), 1);
    assert_eq!(kept.index(), 0);

    let bytes = StringPool::flatten(&pool, true)?;
    let view = StringPoolView::from(&bytes)?;
    assert_eq!(view.len(), 1);
    assert_eq!(view.get(0)?, "kept");
    Ok(())
}

#[test]
fn test_equal_strings_share_an_index() {
    let mut pool = StringPool::new();
    let a = pool.make_ref("shared");
    let b = pool.make_ref("shared");
    let c = pool.make_ref_with_context("shared", Context::with_priority(Context::HIGH_PRIORITY));

    assert_eq!(a.index(), b.index());
    assert_ne!(a.index(), c.index());
    assert_eq!(pool.len(), 2);
}

#[test]
fn test_truncated_chunk_is_rejected() -> Result<()> {
    let mut pool = StringPool::new();
    pool.make_ref("some text");
    let bytes = StringPool::flatten(&pool, false)?;

    assert!(StringPoolView::from(&bytes[..bytes.len() - 4]).is_err());
    assert!(StringPoolView::from(&bytes[..8]).is_err());
    Ok(())
}
