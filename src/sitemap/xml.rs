//! Sitemap protocol XML rendering.
//!
//! # Urlset
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://shop.example/shops/corner-shop</loc>
//!     <lastmod>2025-01-01T00:00:00+00:00</lastmod>
//!     <changefreq>daily</changefreq>
//!   </url>
//! </urlset>
//! ```
//!
//! # Index
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>https://shop.example/sitemap-pages.xml</loc>
//!   </sitemap>
//! </sitemapindex>
//! ```
//!
//! Neither document embeds generation time, so identical input renders
//! identical bytes.

use super::SitemapEntry;
use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

type XmlWriter = Writer<Vec<u8>>;

/// Render a `<urlset>` document.
pub fn render_urlset(entries: &[SitemapEntry]) -> Result<Vec<u8>> {
    let mut writer = open_document("urlset", entries.len())?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = entry.lastmod {
            write_text_element(&mut writer, "lastmod", &lastmod.to_w3c())?;
        }
        if let Some(changefreq) = entry.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq.as_str())?;
        }
        if let Some(priority) = entry.priority {
            write_text_element(&mut writer, "priority", &format!("{priority:.1}"))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    close_document(writer, "urlset")
}

/// Render a `<sitemapindex>` document listing sub-sitemap locations.
pub fn render_index(locations: &[String]) -> Result<Vec<u8>> {
    let mut writer = open_document("sitemapindex", locations.len())?;

    for loc in locations {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", loc)?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    close_document(writer, "sitemapindex")
}

fn open_document(root: &str, items: usize) -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::with_capacity(128 + items * 160), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new(root).with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;
    Ok(writer)
}

fn close_document(mut writer: XmlWriter, root: &str) -> Result<Vec<u8>> {
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
