//! Turns the rendered page into searchable documents.
//!
//! Five passes run in a fixed order (navigation links, headings, content
//! blocks, profile text, buttons). Content blocks whose opening text already
//! appears in an earlier document are skipped, which mostly catches paragraphs
//! already swallowed by a heading's trailing-text scan.

use crate::error::ExtractError;
use crate::page::ContentProvider;
use crate::search::tokenize::{
    char_prefix, content_keywords, first_sentence, slugify, truncate_with_ellipsis, word_tokens,
};
use crate::types::{DocumentType, SearchDocument};

const NAV_SELECTOR: &str = r#"nav a, .nav-link, [role="navigation"] a"#;
const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
const CONTENT_SELECTOR: &str = "p, article, section, .content > *, [data-searchable]";
const PROFILE_SELECTOR: &str = "#sidebar .site-title, #sidebar .site-subtitle, .profile-wrapper p";
const BUTTON_SELECTOR: &str = "button";

/// Stop collecting a heading's trailing text once this many characters are gathered.
const HEADING_CONTENT_LIMIT: usize = 200;
const HEADING_SLUG_CHARS: usize = 20;
/// Content blocks shorter than this are noise (bylines, counters, labels).
const MIN_CONTENT_CHARS: usize = 20;
/// Length of the opening snippet used for overlap detection.
const OVERLAP_PREFIX_CHARS: usize = 50;
const CONTENT_TITLE_CHARS: usize = 60;
const PROFILE_TITLE_CHARS: usize = 50;
/// Labels this long or longer are not treated as buttons.
const MAX_BUTTON_LABEL_CHARS: usize = 50;
const SIDEBAR_ANCHOR: &str = "#sidebar";

/// Runs every extraction pass over `provider`.
///
/// The only write to the page is giving unnamed headings and content blocks an
/// `id`, so that their `href` resolves.
pub fn extract<P: ContentProvider>(provider: &mut P) -> Result<Vec<SearchDocument>, ExtractError> {
    let mut documents = Vec::new();
    extract_navigation(provider, &mut documents)?;
    extract_headings(provider, &mut documents)?;
    extract_content(provider, &mut documents)?;
    extract_profile(provider, &mut documents)?;
    extract_buttons(provider, &mut documents)?;
    Ok(documents)
}

fn extract_navigation<P: ContentProvider>(
    provider: &P,
    out: &mut Vec<SearchDocument>,
) -> Result<(), ExtractError> {
    for (index, link) in provider.query_all(NAV_SELECTOR)?.into_iter().enumerate() {
        let text = provider.text_of(link)?;
        let title = text.trim();
        if title.is_empty() {
            continue;
        }

        let href = match provider.attribute_of(link, "href")? {
            Some(href) if !href.is_empty() => href,
            _ => provider
                .attribute_of(link, "data-href")?
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "#".to_string()),
        };

        out.push(SearchDocument {
            id: format!("nav-item-{index}"),
            title: title.to_string(),
            doc_type: DocumentType::Navigation,
            category: "Page".to_string(),
            content: format!("Navigate to {title}"),
            href: Some(href),
            keywords: word_tokens(title),
        });
    }
    Ok(())
}

/// `h1` → 1 ... `h6` → 6; anything else is not a heading.
fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Visible text of the siblings after `heading`, up to the next heading of the same or a higher rank.
fn trailing_text<P: ContentProvider>(
    provider: &P,
    heading: P::Node,
    level: u8,
) -> Result<String, ExtractError> {
    let mut collected = String::new();
    let mut next = provider.next_sibling(heading)?;

    while let Some(sibling) = next {
        if collected.chars().count() >= HEADING_CONTENT_LIMIT {
            break;
        }
        if heading_level(&provider.tag_name(sibling)?).is_some_and(|l| l <= level) {
            break;
        }
        let text = provider.text_of(sibling)?;
        let text = text.trim();
        if !text.is_empty() {
            collected.push_str(text);
            collected.push(' ');
        }
        next = provider.next_sibling(sibling)?;
    }

    Ok(collected.trim_end().to_string())
}

fn extract_headings<P: ContentProvider>(
    provider: &mut P,
    out: &mut Vec<SearchDocument>,
) -> Result<(), ExtractError> {
    for (index, heading) in provider.query_all(HEADING_SELECTOR)?.into_iter().enumerate() {
        let text = provider.text_of(heading)?;
        let title = text.trim();
        if title.is_empty() {
            continue;
        }

        let tag = provider.tag_name(heading)?;
        let level = heading_level(&tag).unwrap_or(6);
        let trailing = trailing_text(provider, heading, level)?;

        let id = match provider.attribute_of(heading, "id")? {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = format!("heading-{index}-{}", slugify(title, HEADING_SLUG_CHARS));
                provider.set_attribute(heading, "id", &id)?;
                id
            }
        };

        out.push(SearchDocument {
            href: Some(format!("#{id}")),
            id,
            title: title.to_string(),
            doc_type: DocumentType::Heading,
            category: tag.to_uppercase(),
            content: if trailing.is_empty() {
                title.to_string()
            } else {
                trailing
            },
            keywords: word_tokens(title),
        });
    }
    Ok(())
}

fn extract_content<P: ContentProvider>(
    provider: &mut P,
    out: &mut Vec<SearchDocument>,
) -> Result<(), ExtractError> {
    for (index, block) in provider.query_all(CONTENT_SELECTOR)?.into_iter().enumerate() {
        let raw = provider.text_of(block)?;
        let text = raw.trim();
        if text.chars().count() < MIN_CONTENT_CHARS {
            continue;
        }

        let opening = char_prefix(text, OVERLAP_PREFIX_CHARS);
        if out.iter().any(|doc| doc.content.contains(opening)) {
            continue;
        }

        let sentence = first_sentence(text);
        let title = if sentence.is_empty() {
            format!("Content {}", index + 1)
        } else {
            truncate_with_ellipsis(sentence, CONTENT_TITLE_CHARS)
        };

        let anchor = match provider.attribute_of(block, "id")? {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = format!("content-{index}");
                provider.set_attribute(block, "id", &id)?;
                id
            }
        };

        out.push(SearchDocument {
            id: format!("content-{index}"),
            title,
            doc_type: DocumentType::Content,
            category: provider.tag_name(block)?.to_uppercase(),
            content: text.to_string(),
            href: Some(format!("#{anchor}")),
            keywords: content_keywords(text),
        });
    }
    Ok(())
}

fn extract_profile<P: ContentProvider>(
    provider: &P,
    out: &mut Vec<SearchDocument>,
) -> Result<(), ExtractError> {
    for (index, element) in provider.query_all(PROFILE_SELECTOR)?.into_iter().enumerate() {
        let raw = provider.text_of(element)?;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        out.push(SearchDocument {
            id: format!("sidebar-{index}"),
            title: truncate_with_ellipsis(text, PROFILE_TITLE_CHARS),
            doc_type: DocumentType::Profile,
            category: "Sidebar".to_string(),
            content: text.to_string(),
            href: Some(SIDEBAR_ANCHOR.to_string()),
            keywords: word_tokens(text),
        });
    }
    Ok(())
}

fn extract_buttons<P: ContentProvider>(
    provider: &P,
    out: &mut Vec<SearchDocument>,
) -> Result<(), ExtractError> {
    for (index, button) in provider.query_all(BUTTON_SELECTOR)?.into_iter().enumerate() {
        let aria_label = provider
            .attribute_of(button, "aria-label")?
            .filter(|l| !l.is_empty());
        let aria_hidden = provider.attribute_of(button, "aria-hidden")?.as_deref() == Some("true");
        // a labelled button stays searchable even when hidden from assistive tech
        if aria_hidden && aria_label.is_none() {
            continue;
        }

        let label = match aria_label {
            Some(label) => label,
            None => provider.text_of(button)?.trim().to_string(),
        };
        if label.is_empty() || label.chars().count() >= MAX_BUTTON_LABEL_CHARS {
            continue;
        }

        out.push(SearchDocument {
            id: format!("button-{index}"),
            keywords: word_tokens(&label),
            content: format!("Button: {label}"),
            title: label,
            doc_type: DocumentType::Button,
            category: "UI Element".to_string(),
            href: None,
        });
    }
    Ok(())
}
