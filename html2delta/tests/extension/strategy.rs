use html2delta::{
    Attributes, DefaultHtmlOperations, Delta, Element, HtmlOperations, HtmlToDelta, Op, Resolver,
    Result,
};

/// Renders blockquotes as italic paragraphs and images as links; everything else is default.
struct PlainQuotes;

impl HtmlOperations for PlainQuotes {
    fn paragraph_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.paragraph_to_ops(cx, element)
    }

    fn header_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.header_to_ops(cx, element)
    }

    fn span_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.span_to_ops(cx, element)
    }

    fn list_to_ops(&self, cx: &Resolver<'_>, element: &Element, indent: u8) -> Result<Vec<Op>> {
        DefaultHtmlOperations.list_to_ops(cx, element, indent)
    }

    fn img_to_ops(&self, _cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let src = element.attr("src").unwrap_or_default();
        Ok(vec![Op::new(src, Attributes::new().with("link", src))])
    }

    fn link_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.link_to_ops(cx, element)
    }

    fn video_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.video_to_ops(cx, element)
    }

    fn blockquote_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let mut delta = Delta::new();
        cx.processor().process_children(
            element,
            &Attributes::new().with("italic", true),
            &mut delta,
        )?;
        delta.insert("\n", None);
        Ok(delta.into_ops())
    }

    fn code_block_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.code_block_to_ops(cx, element)
    }

    fn div_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.div_to_ops(cx, element)
    }

    fn br_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        DefaultHtmlOperations.br_to_ops(cx, element)
    }
}

#[test]
fn test_replaced_strategy_is_used() {
    let delta = HtmlToDelta::new()
        .with_operations(PlainQuotes)
        .convert("<blockquote>said</blockquote><img src=\"a.png\">")
        .unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::new("said", Attributes::new().with("italic", true)),
            Op::newline(),
            Op::new("a.png", Attributes::new().with("link", "a.png")),
            Op::newline(),
        ]
    );
}

#[test]
fn test_replaced_strategy_applies_when_nested() {
    let delta = HtmlToDelta::new()
        .with_operations(PlainQuotes)
        .convert("<div><blockquote>inner</blockquote></div>")
        .unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::new("inner", Attributes::new().with("italic", true)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_default_rules_are_kept() {
    let delta = HtmlToDelta::new()
        .with_operations(PlainQuotes)
        .convert("<h2>kept</h2>")
        .unwrap();

    assert_eq!(
        delta.ops()[1],
        Op::new("\n", Attributes::new().with("header", 2u8))
    );
}
