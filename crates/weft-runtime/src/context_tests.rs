use std::io;

use crate::{
    Attributes, CancellationToken, Component, CssClass, Error, RenderContext, RenderOptions,
    SafeUrl, ScriptCall, component, render, render_fragments_to_string, render_to_string,
    render_with_options_to_string,
};

fn page() -> impl Component {
    component(|ctx, w| {
        ctx.write(w, "<main>")?;
        ctx.fragment("a", w, |ctx, w| ctx.write(w, "<p>A</p>"))?;
        ctx.fragment("b", w, |ctx, w| {
            ctx.write(w, "<section>")?;
            ctx.fragment("inner", w, |ctx, w| ctx.write(w, "<p>inner</p>"))?;
            ctx.write(w, "</section>")
        })?;
        ctx.write(w, "</main>")
    })
}

#[test]
fn writes_text_escaped() {
    let c = component(|ctx, w| ctx.write_escaped(w, r#"It's <fine> & "good""#));
    let html = render_to_string(&c).unwrap();
    assert_eq!(html, "It&#39;s &lt;fine&gt; &amp; &#34;good&#34;");
}

#[test]
fn fragments_render_everything_without_selection() {
    let html = render_to_string(&page()).unwrap();
    assert_eq!(
        html,
        "<main><p>A</p><section><p>inner</p></section></main>"
    );
}

#[test]
fn fragments_render_only_requested() {
    let html = render_fragments_to_string(&page(), ["a"]).unwrap();
    assert_eq!(html, "<p>A</p>");
}

#[test]
fn fragments_follow_document_order() {
    let html = render_fragments_to_string(&page(), ["inner", "a"]).unwrap();
    assert_eq!(html, "<p>A</p><p>inner</p>");
}

#[test]
fn fragments_outer_includes_inner() {
    let html = render_fragments_to_string(&page(), ["b"]).unwrap();
    assert_eq!(html, "<section><p>inner</p></section>");
}

#[test]
fn fragments_unknown_id_is_empty() {
    let html = render_fragments_to_string(&page(), ["missing"]).unwrap();
    assert_eq!(html, "");
}

#[test]
fn cancelled_render_writes_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let mut out = Vec::new();
    let err = render(&page(), RenderOptions::new().cancel(token), &mut out).unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert!(out.is_empty());
}

#[test]
fn cancellation_stops_mid_render() {
    let token = CancellationToken::new();
    let inner = token.clone();
    let c = component(move |ctx, w| {
        ctx.write(w, "before")?;
        inner.cancel();
        ctx.write(w, "after")
    });
    let mut out = Vec::new();
    let err = render(&c, RenderOptions::new().cancel(token), &mut out).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(out, b"before");
}

#[test]
fn children_are_explicit() {
    let layout = component(|ctx, w| {
        ctx.write(w, "<div>")?;
        if let Some(children) = ctx.children() {
            children.render(&ctx.clear_children(), w)?;
        }
        ctx.write(w, "</div>")
    });
    let body = component(|ctx, w| ctx.write(w, "body"));
    let html = render_with_options_to_string(&layout, RenderOptions::new().children(&body)).unwrap();
    assert_eq!(html, "<div>body</div>");

    let html = render_to_string(&layout).unwrap();
    assert_eq!(html, "<div></div>");
}

#[test]
fn with_children_replaces_children() {
    fn show(ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> crate::Result<()> {
        match ctx.children() {
            Some(c) => c.render(ctx, w),
            None => ctx.write(w, "none"),
        }
    }
    let body = component(|ctx, w| ctx.write(w, "x"));
    let c = component(|ctx, w| {
        show(&ctx.clear_children(), w)?;
        show(&ctx.with_children(&body), w)
    });
    assert_eq!(render_to_string(&c).unwrap(), "nonex");
}

#[test]
fn url_values_are_sanitized_unless_trusted() {
    let c = component(|ctx, w| {
        ctx.write_url(w, "javascript:alert(1)")?;
        ctx.write(w, " ")?;
        ctx.write_url(w, &SafeUrl::new("javascript:alert('x')"))
    });
    assert_eq!(
        render_to_string(&c).unwrap(),
        "about:invalid#WeftFailedSanitizationURL javascript:alert(&#39;x&#39;)"
    );
}

#[test]
fn css_classes_are_emitted_once() {
    let class = CssClass::new("primary", "color:red;");
    let c = component(|ctx, w| {
        for _ in 0..2 {
            ctx.render_css(w, &(&class, "big"))?;
            ctx.write(w, "<b class=\"")?;
            ctx.write_classes(w, &(&class, "big"))?;
            ctx.write(w, "\"></b>")?;
        }
        Ok(())
    });
    let html = render_to_string(&c).unwrap();
    let name = class.name();
    assert_eq!(
        html,
        format!(
            "<style type=\"text/css\">.{name}{{color:red;}}</style>\
             <b class=\"{name} big\"></b><b class=\"{name} big\"></b>"
        )
    );
}

#[test]
fn scripts_are_emitted_once() {
    let call = ScriptCall::new("notify", &["msg"], "alert(msg)").arg("hi");
    let c = component(|ctx, w| {
        ctx.render_scripts(w, &call)?;
        ctx.render_scripts(w, &call)?;
        ctx.write_script(w, &call)
    });
    let html = render_to_string(&c).unwrap();
    let name = call.function_name();
    assert_eq!(
        html,
        format!("<script>function {name}(msg) {{alert(msg)}}</script>{name}(&#34;hi&#34;)")
    );
}

#[test]
fn spread_attributes() {
    let attrs = Attributes::new()
        .set("id", "main")
        .set("hidden", true)
        .set("disabled", false)
        .set("href", "javascript:void(0)")
        .set("bad name", "x");
    let c = component(|ctx, w| ctx.write_attributes(w, &attrs));
    assert_eq!(
        render_to_string(&c).unwrap(),
        r#" id="main" hidden href="about:invalid#WeftFailedSanitizationURL""#
    );
}

#[test]
fn style_values_are_sanitized() {
    let c = component(|ctx, w| {
        ctx.write_style(w, "color: red; width: expression(alert(1))")?;
        ctx.write(w, "|")?;
        ctx.write_style(w, &[("Background", "blue")])
    });
    assert_eq!(
        render_to_string(&c).unwrap(),
        "color:red;width:zWeftUnsafeCSSPropertyValue;|background:blue;"
    );
}
