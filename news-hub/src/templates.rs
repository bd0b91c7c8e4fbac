//! Prompt templates and the per-stage article serializations fed into them.
//!
//! Templates are plain data with `{name}` placeholders; [`render`] does the
//! substitution in one pass so article text is never re-scanned.

use crate::types::CuratedArticle;

pub const BLOG_TEMPLATE: &str = "Write a comprehensive, well-structured blog post analyzing these news articles:

ARTICLES:
{articles}

Requirements:
1. **Headline** - Compelling and descriptive (8-12 words)
2. **Introduction** - Context and overview (150-200 words)
3. **Main Analysis** - 3-5 sections covering key points with insights
4. **Key Takeaways** - 5-7 bullet points of important insights
5. **Future Implications** - What comes next and why it matters
6. **Conclusion** - Summary and call to action

Style: Professional, engaging, data-driven. Total: 1000-1500 words.

BEGIN:";

pub const SUMMARY_TEMPLATE: &str = "Create a concise executive summary of these articles:

ARTICLES:
{articles}

Provide:
1. **Opening Statement** - Main theme in 1-2 sentences
2. **Key Developments** - 3-4 major points with specifics
3. **Takeaway** - What readers should remember (2-3 sentences)

Target: 150-200 words, clear and scannable.";

pub const CATEGORIES_TEMPLATE: &str = "Organize these articles into logical categories:

ARTICLES:
{articles}

For each category:
1. **[Category Name]**
   - List relevant articles
   - Brief explanation of why grouped together

Keep categories clear and useful. Maximum 5 categories.";

pub const TRENDS_TEMPLATE: &str = "Analyze trends in these articles:

ARTICLES:
{articles}

Identify and explain:
1. **Main Trends** - What patterns emerge?
2. **Most Discussed Topics** - What's getting attention?
3. **Key Developments** - Major breakthroughs or changes
4. **Market Impact** - Who benefits/loses?
5. **Timeline** - When will key events likely happen?
6. **Future Outlook** - What comes next?

Be specific and insightful.";

pub const EXPLAIN_TEMPLATE: &str = "Explain this article in simple, clear terms:

Title: {title}
Content: {content}

Provide:
1. **What Happened** (2-3 sentences)
   - What is the main news/event?

2. **Why It Matters** (2-3 sentences)
   - Why is this important?
   - Who is affected?

3. **Impact** (2-3 sentences)
   - What are the consequences?
   - What should people know?

Keep it clear and easy to understand.";

/// Substitute `{name}` placeholders from `vars`.
///
/// Unknown placeholders and stray braces are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// `"{i}. {title} ({source})\n{summary}"`, blank line between entries.
pub fn blog_articles(articles: &[CuratedArticle]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {} ({})\n{}", i + 1, a.title, a.source, a.summary))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `"{i}. {title}: {summary}"`, one per line.
pub fn summary_articles(articles: &[CuratedArticle]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}: {}", i + 1, a.title, a.summary))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"- {title}"`, one per line.
pub fn title_list(articles: &[CuratedArticle]) -> String {
    articles
        .iter()
        .map(|a| format!("- {}", a.title))
        .collect::<Vec<_>>()
        .join("\n")
}
