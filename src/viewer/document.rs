//! The facts about an open document that command handlers need.
//! Rendering and text extraction live elsewhere.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use lopdf::{Dictionary, Object, ObjectId};
use serde::Serialize;

/// US Letter, in points.
pub const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// Guards against cyclic name trees.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// Where a link annotation leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum LinkTarget {
    Page(usize),
    Dest(String),
    Uri(String),
}

/// A link annotation; `rect` is `[x0, y0, x1, y1]` in PDF user space with
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub rect: [f64; 4],
    pub target: LinkTarget,
}

impl Link {
    pub fn new(rect: [f64; 4], target: LinkTarget) -> Self {
        let [x0, y0, x1, y1] = rect;
        Self {
            rect: [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)],
            target,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let [x0, y0, x1, y1] = self.rect;
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    num_pages: usize,
    page_size: (f64, f64),
    destinations: HashMap<String, usize>,
    links: HashMap<usize, Vec<Link>>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, num_pages: usize) -> Self {
        Self {
            path: path.into(),
            num_pages,
            page_size: DEFAULT_PAGE_SIZE,
            destinations: HashMap::new(),
            links: HashMap::new(),
        }
    }

    pub fn with_destination(mut self, name: impl Into<String>, page: usize) -> Self {
        self.destinations.insert(name.into(), page);
        self
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = (width, height);
        self
    }

    pub fn with_link(mut self, page: usize, link: Link) -> Self {
        self.links.entry(page).or_default().push(link);
        self
    }

    /// Read page count, first-page size and named destinations from a PDF.
    pub fn load(path: &Path) -> Result<Self> {
        let pdf = lopdf::Document::load(path).with_context(|| format!("Failed to open {path:?}"))?;
        let pages = pdf.get_pages();
        if pages.is_empty() {
            bail!("{path:?} has no pages");
        }
        let page_numbers: HashMap<ObjectId, usize> =
            pages.iter().map(|(num, id)| (*id, *num as usize)).collect();

        let page_size = pages
            .get(&1)
            .and_then(|id| media_box(&pdf, *id))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let mut destinations = HashMap::new();
        if let Some(catalog) = catalog(&pdf) {
            collect_destinations(&pdf, catalog, &page_numbers, &mut destinations);
        }

        let mut links = HashMap::new();
        for (num, id) in &pages {
            let page_links = page_links(&pdf, *id, &page_numbers);
            if !page_links.is_empty() {
                links.insert(*num as usize, page_links);
            }
        }

        debug!(
            "Loaded {path:?}: {} pages, {} named destinations, links on {} pages",
            pages.len(),
            destinations.len(),
            links.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            num_pages: pages.len(),
            page_size,
            destinations,
            links,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    pub fn destination(&self, name: &str) -> Option<usize> {
        self.destinations.get(name).copied()
    }

    /// Short description of a link target: `[page N]`, `[internal]` for an
    /// unresolvable destination, or the URI.
    pub fn link_info(&self, target: &LinkTarget) -> String {
        match target {
            LinkTarget::Page(page) => format!("[page {page}]"),
            LinkTarget::Dest(name) => match self.destination(name) {
                Some(page) => format!("[page {page}]"),
                None => "[internal]".to_string(),
            },
            LinkTarget::Uri(uri) => uri.clone(),
        }
    }

    /// The topmost link on `page` containing the user-space point.
    pub fn link_at(&self, page: usize, x: f64, y: f64) -> Option<&Link> {
        self.links
            .get(&page)?
            .iter()
            .rev()
            .find(|link| link.contains(x, y))
    }
}

fn resolve<'a>(pdf: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => pdf.get_object(*id).ok(),
        other => Some(other),
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn catalog(pdf: &lopdf::Document) -> Option<&Dictionary> {
    let root = pdf.trailer.get(b"Root").ok()?;
    resolve(pdf, root)?.as_dict().ok()
}

fn media_box(pdf: &lopdf::Document, page: ObjectId) -> Option<(f64, f64)> {
    let dict = pdf.get_object(page).ok()?.as_dict().ok()?;
    let rect = resolve(pdf, dict.get(b"MediaBox").ok()?)?.as_array().ok()?;
    let coords: Vec<f64> = rect.iter().filter_map(number).collect();
    match coords[..] {
        [x0, y0, x1, y1] => Some(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}

/// Page number a destination points at: `[page /XYZ ...]` or `<< /D [...] >>`.
fn destination_page(
    pdf: &lopdf::Document,
    dest: &Object,
    page_numbers: &HashMap<ObjectId, usize>,
) -> Option<usize> {
    let dest = resolve(pdf, dest)?;
    let array = match dest {
        Object::Dictionary(dict) => resolve(pdf, dict.get(b"D").ok()?)?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    match array.first()? {
        Object::Reference(id) => page_numbers.get(id).copied(),
        _ => None,
    }
}

fn page_links(
    pdf: &lopdf::Document,
    page: ObjectId,
    page_numbers: &HashMap<ObjectId, usize>,
) -> Vec<Link> {
    let Some(annots) = pdf
        .get_object(page)
        .ok()
        .and_then(|p| p.as_dict().ok())
        .and_then(|p| p.get(b"Annots").ok())
        .and_then(|a| resolve(pdf, a))
        .and_then(|a| a.as_array().ok())
    else {
        return Vec::new();
    };

    annots
        .iter()
        .filter_map(|annot| resolve(pdf, annot)?.as_dict().ok())
        .filter(|annot| matches!(annot.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Link"))
        .filter_map(|annot| {
            let rect = resolve(pdf, annot.get(b"Rect").ok()?)?.as_array().ok()?;
            let coords: Vec<f64> = rect.iter().filter_map(number).collect();
            let [x0, y0, x1, y1] = coords[..] else {
                return None;
            };
            let target = link_target(pdf, annot, page_numbers)?;
            Some(Link::new([x0, y0, x1, y1], target))
        })
        .collect()
}

fn link_target(
    pdf: &lopdf::Document,
    annot: &Dictionary,
    page_numbers: &HashMap<ObjectId, usize>,
) -> Option<LinkTarget> {
    if let Ok(dest) = annot.get(b"Dest") {
        return dest_target(pdf, dest, page_numbers);
    }
    let action = resolve(pdf, annot.get(b"A").ok()?)?.as_dict().ok()?;
    match action.get(b"S").ok()? {
        Object::Name(kind) if kind == b"URI" => match resolve(pdf, action.get(b"URI").ok()?)? {
            Object::String(uri, _) => Some(LinkTarget::Uri(String::from_utf8_lossy(uri).into_owned())),
            _ => None,
        },
        Object::Name(kind) if kind == b"GoTo" => dest_target(pdf, action.get(b"D").ok()?, page_numbers),
        _ => None,
    }
}

fn dest_target(
    pdf: &lopdf::Document,
    dest: &Object,
    page_numbers: &HashMap<ObjectId, usize>,
) -> Option<LinkTarget> {
    match resolve(pdf, dest)? {
        Object::Name(name) | Object::String(name, _) => {
            Some(LinkTarget::Dest(String::from_utf8_lossy(name).into_owned()))
        }
        other => destination_page(pdf, other, page_numbers).map(LinkTarget::Page),
    }
}

fn collect_destinations(
    pdf: &lopdf::Document,
    catalog: &Dictionary,
    page_numbers: &HashMap<ObjectId, usize>,
    out: &mut HashMap<String, usize>,
) {
    // old style: /Dests dictionary in the catalog
    if let Some(dests) = catalog
        .get(b"Dests")
        .ok()
        .and_then(|d| resolve(pdf, d))
        .and_then(|d| d.as_dict().ok())
    {
        for (name, dest) in dests.iter() {
            if let Some(page) = destination_page(pdf, dest, page_numbers) {
                out.insert(String::from_utf8_lossy(name).into_owned(), page);
            }
        }
    }

    // new style: /Names << /Dests name-tree >>
    if let Some(tree) = catalog
        .get(b"Names")
        .ok()
        .and_then(|n| resolve(pdf, n))
        .and_then(|n| n.as_dict().ok())
        .and_then(|n| n.get(b"Dests").ok())
        .and_then(|d| resolve(pdf, d))
        .and_then(|d| d.as_dict().ok())
    {
        walk_name_tree(pdf, tree, page_numbers, out, 0);
    }
}

fn walk_name_tree(
    pdf: &lopdf::Document,
    node: &Dictionary,
    page_numbers: &HashMap<ObjectId, usize>,
    out: &mut HashMap<String, usize>,
    depth: usize,
) {
    if depth > MAX_NAME_TREE_DEPTH {
        warn!("Named destination tree is too deep, ignoring the rest");
        return;
    }

    if let Some(names) = node
        .get(b"Names")
        .ok()
        .and_then(|n| resolve(pdf, n))
        .and_then(|n| n.as_array().ok())
    {
        for pair in names.chunks(2) {
            if let [Object::String(name, _), dest] = pair {
                if let Some(page) = destination_page(pdf, dest, page_numbers) {
                    out.insert(String::from_utf8_lossy(name).into_owned(), page);
                }
            }
        }
    }

    if let Some(kids) = node
        .get(b"Kids")
        .ok()
        .and_then(|k| resolve(pdf, k))
        .and_then(|k| k.as_array().ok())
    {
        for kid in kids {
            if let Some(kid) = resolve(pdf, kid).and_then(|k| k.as_dict().ok()) {
                walk_name_tree(pdf, kid, page_numbers, out, depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Three-page PDF with an old-style /Dests entry and a name tree entry.
    fn write_sample_pdf(path: &Path) {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let page_ids: Vec<ObjectId> = (0..3)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                })
            })
            .collect();

        // page 1 links to page 3 and to a web site
        let goto = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![100.into(), 700.into(), 200.into(), 720.into()],
            "Dest" => vec![Object::Reference(page_ids[2]), "Fit".into()],
        });
        let web = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![100.into(), 600.into(), 200.into(), 620.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal("https://example.com/a b"),
            },
        });
        let first = page_ids[0];
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(first) {
            page.set("Annots", vec![Object::Reference(goto), Object::Reference(web)]);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => 3,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let dests = doc.add_object(dictionary! {
            "intro" => vec![Object::Reference(page_ids[1]), "Fit".into()],
        });
        let name_tree = doc.add_object(dictionary! {
            "Names" => vec![
                Object::string_literal("appendix"),
                vec![Object::Reference(page_ids[2]), "Fit".into()].into(),
            ],
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Dests" => dests,
            "Names" => dictionary! { "Dests" => name_tree },
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn loads_pages_size_and_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        write_sample_pdf(&path);

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.num_pages(), 3);
        assert_eq!(doc.page_size(), (595.0, 842.0));
        assert_eq!(doc.destination("intro"), Some(2));
        assert_eq!(doc.destination("appendix"), Some(3));
        assert_eq!(doc.destination("missing"), None);

        assert_eq!(
            doc.link_at(1, 150.0, 710.0).map(|l| &l.target),
            Some(&LinkTarget::Page(3))
        );
        assert_eq!(
            doc.link_at(1, 150.0, 610.0).map(|l| &l.target),
            Some(&LinkTarget::Uri("https://example.com/a b".into()))
        );
        assert!(doc.link_at(1, 10.0, 10.0).is_none());
        assert!(doc.link_at(2, 150.0, 710.0).is_none());
    }

    #[test]
    fn load_fails_for_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not a pdf").unwrap();
        assert!(Document::load(&path).is_err());
    }

    #[test]
    fn builder_helpers() {
        let doc = Document::new("a.pdf", 10)
            .with_destination("ch2", 4)
            .with_page_size(100.0, 200.0);
        assert_eq!(doc.destination("ch2"), Some(4));
        assert_eq!(doc.page_size(), (100.0, 200.0));
        assert_eq!(doc.path(), Path::new("a.pdf"));
    }

    #[test]
    fn link_info_describes_targets() {
        let doc = Document::new("a.pdf", 5).with_destination("ch1", 2);
        assert_eq!(doc.link_info(&LinkTarget::Page(4)), "[page 4]");
        assert_eq!(doc.link_info(&LinkTarget::Dest("ch1".into())), "[page 2]");
        assert_eq!(doc.link_info(&LinkTarget::Dest("nope".into())), "[internal]");
        assert_eq!(doc.link_info(&LinkTarget::Uri("http://a".into())), "http://a");
    }

    #[test]
    fn link_rects_are_normalized() {
        let doc = Document::new("a.pdf", 2).with_link(
            2,
            Link::new([50.0, 80.0, 10.0, 20.0], LinkTarget::Dest("x".into())),
        );
        let link = doc.link_at(2, 30.0, 50.0).unwrap();
        assert_eq!(link.rect, [10.0, 20.0, 50.0, 80.0]);
    }
}
