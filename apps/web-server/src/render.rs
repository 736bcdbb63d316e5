//! Server-rendered HTML pages.

use std::fmt::Write;

use ublog_core::domain::{MAX_CONTENT_LENGTH, Post};
use ublog_shared::ActionData;

use crate::context::RequestContext;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn header(ctx: &RequestContext) -> String {
    let session = match &ctx.user {
        Some(user) => {
            let avatar = user
                .avatar_url
                .as_deref()
                .map(|url| {
                    format!(
                        r#"<img src="{}" width="32" class="avatar" alt="">"#,
                        escape(url)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"{}<span class="user">{}</span><form method="POST" action="/logout"><button type="submit">Sign out</button></form>"#,
                avatar,
                escape(user.display_name())
            )
        }
        None => format!(
            r#"<a href="{}">Sign in with GitHub</a>"#,
            escape(&ctx.sign_in_url())
        ),
    };

    format!(r#"<header><strong>uBlog</strong><span>{}</span></header>"#, session)
}

fn layout(ctx: &RequestContext, title: &str, head: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title>{}</head><body>{}<main>{}</main></body></html>",
        escape(title),
        head,
        header(ctx),
        main
    )
}

/// The post list, plus the submission form for signed-in users.
pub fn home_page(ctx: &RequestContext, posts: &[Post], action: Option<&ActionData>) -> String {
    let mut main = String::from("<ul>");
    for post in posts {
        let author = post.author.as_deref().unwrap_or("Unknown author");
        let posted_at = post
            .posted_at
            .map(|t| {
                format!(
                    r#"<time datetime="{}">{}</time>"#,
                    t.to_rfc3339(),
                    t.format("%Y-%m-%d %H:%M UTC")
                )
            })
            .unwrap_or_else(|| "Unknown date".to_string());

        let _ = write!(
            main,
            r#"<li id="post-{}"><div>{}</div><div><i>{}</i> <span>{}</span></div></li>"#,
            escape(&post.key),
            escape(&post.content),
            escape(author),
            posted_at
        );
    }
    main.push_str("</ul>");

    if ctx.user.is_some() {
        let content = action.and_then(|a| a.content.as_deref()).unwrap_or("");
        let error = action
            .and_then(|a| a.error.as_deref())
            .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
            .unwrap_or_default();

        let _ = write!(
            main,
            r#"<form method="POST"><p><label>What&apos;s on your mind?<br><textarea name="content" rows="4" maxlength="{}">{}</textarea></label></p>{}<button type="submit">Submit</button></form>"#,
            MAX_CONTENT_LENGTH,
            escape(content),
            error
        );
    } else if let Some(error) = action.and_then(|a| a.error.as_deref()) {
        let _ = write!(main, r#"<p class="error">{}</p>"#, escape(error));
    }

    layout(ctx, "uBlog", "", &main)
}

/// Landing page shown when sign-in failed.
pub fn login_error_page(ctx: &RequestContext, error: &str) -> String {
    layout(
        ctx,
        "Sign-in failed",
        "",
        &format!("<div>Error: {}</div>", escape(error)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }
}
