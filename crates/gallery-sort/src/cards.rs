//! Extraction and reordering of the gallery's card blocks.
//!
//! Cards are recognized by the `PHOTO CARD START`/`END` comment markers
//! around each `<article>`, so the blocks can be moved wholesale without
//! parsing the markup inside them.

use std::cmp::Reverse;

use chrono::NaiveDate;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::dates::parse_card_date;

static CARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(<!-- ▶▶ PHOTO CARD START -->\s*)(<article[\s\S]*?</article>)(\s*<!-- ◀◀ PHOTO CARD END -->)",
    )
    .unwrap()
});
static GRID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<div class="grid">)([\s\S]*?)(</div>\s*</section>)"#).unwrap());
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<h3\s+class="title">\s*([^<]+?)\s*</h3>"#).unwrap());
static SUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<p\s+class="sub">\s*([^<]+?)\s*</p>"#).unwrap());

/// One card block: the full marker-to-marker text plus the sort keys pulled
/// out of it.
pub struct Card {
    pub block: String,
    pub title: String,
    pub date: Option<NaiveDate>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SortBy {
    Name,
    Date,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Inner text of the gallery grid section, if the document has one.
pub fn find_grid(html: &str) -> Option<&str> {
    GRID_RE
        .captures(html)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

pub fn extract_cards(grid: &str) -> Vec<Card> {
    CARD_RE
        .captures_iter(grid)
        .map(|caps| {
            let article = caps.get(2).map_or("", |m| m.as_str());
            let title = TITLE_RE
                .captures(article)
                .map(|c| unescape(c[1].trim()))
                .unwrap_or_default();
            let sub = SUB_RE
                .captures(article)
                .map(|c| unescape(c[1].trim()))
                .unwrap_or_default();
            Card {
                block: caps.get(0).map_or("", |m| m.as_str()).to_string(),
                date: parse_card_date(&sub),
                title,
            }
        })
        .collect()
}

pub fn sort_cards(cards: &mut [Card], by: SortBy, order: Order) {
    match by {
        SortBy::Name => {
            cards.sort_by_key(|c| c.title.to_lowercase());
            if order == Order::Desc {
                cards.reverse();
            }
        }
        // Cards without a parseable date sort as oldest ascending and
        // newest descending, so they end up at the front either way.
        SortBy::Date => match order {
            Order::Asc => cards.sort_by_key(|c| c.date.unwrap_or(NaiveDate::MIN)),
            Order::Desc => cards.sort_by_key(|c| Reverse(c.date.unwrap_or(NaiveDate::MAX))),
        },
    }
}

/// Rebuild the document with the grid's card blocks in the given order.
/// Everything outside the grid section is byte-identical.
pub fn replace_grid(html: &str, cards: &[Card]) -> String {
    let joined = cards
        .iter()
        .map(|c| c.block.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    GRID_RE
        .replace(html, |caps: &Captures| {
            format!("{}\n{}\n{}", &caps[1], joined, &caps[3])
        })
        .into_owned()
}

/// Decode the named entities the gallery titles use plus numeric character
/// references (`&#8212;`, `&#x27;`). Anything unrecognized stays literal.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let decoded = after
            .find(';')
            .and_then(|end| Some((decode_entity(&after[..end])?, &after[end + 1..])));
        match decoded {
            Some((ch, tail)) => {
                out.push(ch);
                rest = tail;
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}
