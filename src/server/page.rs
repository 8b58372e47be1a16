// src/server/page.rs
//! The single HTML page: title, form, and the output region.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::analysis::AnalysisResult;
use crate::presets::{EVENT_PLACEHOLDER, PERSON_PLACEHOLDER, PRESET_SUBJECTS, PRESET_TOPICS};

const TITLE: &str = "🍵 官場現形記：政治讀心模擬器";

const INTRO: &str = "這裡沒有藍綠白，只有**人性**與**算計**。\n\
輸入政治人物與事件，AI 將為你揭開他們**「冠冕堂皇的官話」**底下，那不為人知的**「內心獨白」**。";

const LOADING_MESSAGE: &str = "🕵️‍♂️ 正在翻閱該人物的私密日記...";

const STYLE: &str = r#"
body { max-width: 760px; margin: 2rem auto; padding: 0 1rem; font-family: sans-serif; line-height: 1.6; }
.row { display: flex; gap: 1rem; }
.row label { flex: 1; display: flex; flex-direction: column; font-weight: bold; }
.row input { padding: .5rem; font-size: 1rem; }
.actions { margin: 1rem 0; display: flex; gap: 1rem; align-items: center; }
button { background: #ff4b4b; color: #fff; border: 0; padding: .6rem 1.2rem; border-radius: .4rem; font-size: 1rem; }
button:disabled { opacity: .6; }
.error { background: #ffe9e9; color: #7d0000; padding: .8rem 1rem; border-radius: .4rem; }
#loading { display: none; }
"#;

// Disable the button and show the loading line while the POST is in flight
const SCRIPT: &str = r#"
document.getElementById('analysis-form').addEventListener('submit', function () {
  document.getElementById('submit').disabled = true;
  document.getElementById('loading').style.display = 'block';
});
"#;

/// What to put on the page.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub person: &'a str,
    pub event: &'a str,
    pub result: Option<&'a AnalysisResult>,
}

pub fn render_page(view: PageView<'_>) -> String {
    let mut page = String::with_capacity(4096);

    page.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{}</title>\n", html_escape(TITLE)));
    page.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    page.push_str(&format!("<h1>{}</h1>\n", html_escape(TITLE)));
    page.push_str(&render_markdown(INTRO));

    page.push_str("<form id=\"analysis-form\" method=\"post\" action=\"/analyze\">\n<div class=\"row\">\n");
    push_input(&mut page, "person", "主角 (政治人物)", view.person, PERSON_PLACEHOLDER, "subjects");
    push_input(&mut page, "event", "遭遇事件", view.event, EVENT_PLACEHOLDER, "topics");
    page.push_str("</div>\n");
    push_datalist(&mut page, "subjects", PRESET_SUBJECTS);
    push_datalist(&mut page, "topics", PRESET_TOPICS);
    page.push_str("<div class=\"actions\">\n");
    page.push_str("<button id=\"submit\" type=\"submit\">🔍 開始剖析 (Start Analysis)</button>\n");
    page.push_str("<a href=\"/random\">🎲 隨機組合</a>\n</div>\n</form>\n");
    page.push_str(&format!("<p id=\"loading\">{}</p>\n", html_escape(LOADING_MESSAGE)));

    match view.result {
        Some(AnalysisResult::Text(text)) => {
            page.push_str("<section id=\"result\">\n<hr>\n");
            page.push_str(&render_markdown(text));
            page.push_str("</section>\n");
        }
        Some(AnalysisResult::Error(message)) => {
            page.push_str(&format!(
                "<section id=\"result\">\n<div class=\"error\" role=\"alert\">{}</div>\n</section>\n",
                html_escape(message)
            ));
        }
        None => {}
    }

    page.push_str(&format!("<script>{SCRIPT}</script>\n</body>\n</html>\n"));
    page
}

fn push_input(page: &mut String, name: &str, label: &str, value: &str, placeholder: &str, list: &str) {
    page.push_str(&format!(
        "<label>{label}<input type=\"text\" name=\"{name}\" value=\"{}\" placeholder=\"{}\" list=\"{list}\"></label>\n",
        html_escape(value),
        html_escape(placeholder),
    ));
}

fn push_datalist(page: &mut String, id: &str, options: &[&str]) {
    page.push_str(&format!("<datalist id=\"{id}\">"));
    for option in options {
        page.push_str(&format!("<option value=\"{}\">", html_escape(option)));
    }
    page.push_str("</datalist>\n");
}

/// Markdown to HTML. Raw HTML in the source is shown as text, not injected,
/// and link or image targets outside http/https/mailto become `#`.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) { url } else { CowStr::Borrowed("#") }
}

/// Relative URLs pass; absolute ones only with an allowed scheme.
fn is_safe_url(url: &str) -> bool {
    let url = url.trim_start();
    let Some(colon) = url.find(':') else {
        return true;
    };
    let scheme = &url[..colon];
    // A colon after a path, query or fragment start is not a scheme separator
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    matches!(scheme.to_ascii_lowercase().as_str(), "http" | "https" | "mailto")
}

/// Escape text for element content and quoted attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
