/// Package implementation for Word documents.
use crate::common::error::{Diagnostic, Diagnostics, Result};
use crate::common::Metadata;
use crate::common::xml::XmlElement;
use crate::html::HtmlOptions;
use crate::ooxml::docx::comment::Comments;
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::font::FontTable;
use crate::ooxml::docx::footnote::{NoteKind, Notes};
use crate::ooxml::docx::header_footer::{HeaderFooter, HeaderFooterKind, HeaderFooters};
use crate::ooxml::docx::media::Media;
use crate::ooxml::docx::numbering::Numbering;
use crate::ooxml::docx::options::ParseOptions;
use crate::ooxml::docx::parts::{
    DocumentBuilder, DocumentPart, core_properties_uri, optional_part, part_relationships,
};
use crate::ooxml::docx::styles::StyleRegistry;
use crate::ooxml::docx::theme::Theme;
use crate::ooxml::metadata::parse_core_properties;
use crate::ooxml::opc::constants::{part_name, relationship_type};
use crate::ooxml::opc::{OpcPackage, PackURI, Relationships};
use std::io::{Read, Seek};
use std::path::Path;

/// Run two loaders, concurrently when `parallel` is set.
fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        let ra = a();
        (ra, b())
    }
}

/// A Word (.docx) package.
///
/// This is the main entry point for working with Word documents. It wraps
/// the container and parses it into a [`ParsedDocument`].
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let parsed = pkg.parse()?;
/// println!("{}", parsed.document().text());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            opc: OpcPackage::open(path)?,
        })
    }

    /// Create a package from raw container bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            opc: OpcPackage::from_bytes(data)?,
        })
    }

    /// Create a package from a reader.
    ///
    /// ```rust,no_run
    /// use longan::ooxml::docx::Package;
    /// use std::io::Cursor;
    ///
    /// let data = std::fs::read("document.docx")?;
    /// let pkg = Package::from_reader(Cursor::new(data))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Ok(Self {
            opc: OpcPackage::from_reader(reader)?,
        })
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Parse with default options.
    pub fn parse(&self) -> Result<ParsedDocument> {
        self.parse_with_options(&ParseOptions::default())
    }

    /// Parse the package.
    ///
    /// Only a missing or malformed main document part is an error. Every
    /// other part degrades to an empty collection with a diagnostic.
    pub fn parse_with_options(&self, options: &ParseOptions) -> Result<ParsedDocument> {
        let diagnostics = Diagnostics::new();
        let main = DocumentPart::load(&self.opc, &diagnostics)?;
        let loader = Loader {
            pkg: &self.opc,
            main: &main,
            options,
            diagnostics: &diagnostics,
        };
        let parallel = options.parallel;

        let (document, (styles, numbering)) = join(
            parallel,
            || main.build(&diagnostics),
            || join(parallel, || loader.styles(), || loader.numbering()),
        );
        let document = document?;

        let ((fonts, theme), ((comments, (footnotes, endnotes)), ((headers, footers), (media, metadata)))) =
            join(
                parallel,
                || join(parallel, || loader.fonts(), || loader.theme()),
                || {
                    join(
                        parallel,
                        || {
                            join(parallel, || loader.comments(), || {
                                join(
                                    parallel,
                                    || loader.notes(NoteKind::Footnote),
                                    || loader.notes(NoteKind::Endnote),
                                )
                            })
                        },
                        || {
                            join(
                                parallel,
                                || {
                                    join(
                                        parallel,
                                        || loader.header_footers(HeaderFooterKind::Header),
                                        || loader.header_footers(HeaderFooterKind::Footer),
                                    )
                                },
                                || join(parallel, || loader.media(), || loader.metadata()),
                            )
                        },
                    )
                },
            );

        tracing::debug!(
            blocks = document.blocks().len(),
            styles = styles.len(),
            diagnostics = diagnostics.len(),
            "parsed package"
        );
        Ok(ParsedDocument {
            part_name: main.uri().as_str().to_string(),
            document,
            styles,
            numbering,
            relationships: main.relationships().clone(),
            fonts,
            theme,
            comments,
            footnotes,
            endnotes,
            headers,
            footers,
            media,
            metadata,
            diagnostics: diagnostics.into_vec(),
        })
    }
}

/// Loads the optional parts related to the main document.
struct Loader<'a> {
    pkg: &'a OpcPackage,
    main: &'a DocumentPart,
    options: &'a ParseOptions,
    diagnostics: &'a Diagnostics,
}

impl Loader<'_> {
    fn related(&self, reltype: &str, fallback: &str) -> Option<(PackURI, XmlElement)> {
        let uri = self.main.related_uri(reltype, fallback)?;
        let root = optional_part(self.pkg, &uri, self.diagnostics)?;
        Some((uri, root))
    }

    fn styles(&self) -> StyleRegistry {
        self.related(relationship_type::STYLES, part_name::STYLES)
            .map(|(_, root)| StyleRegistry::from_xml(&root))
            .unwrap_or_default()
    }

    fn numbering(&self) -> Numbering {
        self.related(relationship_type::NUMBERING, part_name::NUMBERING)
            .map(|(_, root)| Numbering::from_xml(&root))
            .unwrap_or_default()
    }

    fn fonts(&self) -> FontTable {
        self.related(relationship_type::FONT_TABLE, part_name::FONT_TABLE)
            .map(|(_, root)| FontTable::from_xml(&root))
            .unwrap_or_default()
    }

    fn theme(&self) -> Option<Theme> {
        self.related(relationship_type::THEME, part_name::THEME)
            .map(|(_, root)| Theme::from_xml(&root))
    }

    fn comments(&self) -> Comments {
        if !self.options.load_comments {
            return Comments::new();
        }
        let Some((uri, root)) = self.related(relationship_type::COMMENTS, part_name::COMMENTS) else {
            return Comments::new();
        };
        let rels = part_relationships(self.pkg, &uri, self.diagnostics);
        let mut builder = DocumentBuilder::new(uri.as_str(), &rels, self.diagnostics);
        Comments::from_xml(&root, &mut builder)
    }

    fn notes(&self, kind: NoteKind) -> Notes {
        if !self.options.load_notes {
            return Notes::new(kind);
        }
        let (reltype, fallback) = match kind {
            NoteKind::Footnote => (relationship_type::FOOTNOTES, part_name::FOOTNOTES),
            NoteKind::Endnote => (relationship_type::ENDNOTES, part_name::ENDNOTES),
        };
        let Some((uri, root)) = self.related(reltype, fallback) else {
            return Notes::new(kind);
        };
        let rels = part_relationships(self.pkg, &uri, self.diagnostics);
        let mut builder = DocumentBuilder::new(uri.as_str(), &rels, self.diagnostics);
        Notes::from_xml(&root, kind, &mut builder)
    }

    /// Internal targets of every header or footer relationship, with their
    /// part index.
    fn header_footer_uris(&self, kind: HeaderFooterKind) -> Vec<(u32, PackURI)> {
        let reltype = match kind {
            HeaderFooterKind::Header => relationship_type::HEADER,
            HeaderFooterKind::Footer => relationship_type::FOOTER,
        };
        let mut uris: Vec<(u32, PackURI)> = self
            .main
            .relationships()
            .all_of_type(reltype)
            .filter(|rel| !rel.is_external())
            .filter_map(|rel| rel.target_partname().ok())
            .filter_map(|uri| match uri.idx() {
                Some(index) => Some((index, uri)),
                None => {
                    tracing::debug!(part = uri.as_str(), "header/footer part without an index");
                    None
                },
            })
            .collect();
        uris.sort_by_key(|(index, _)| *index);
        uris.dedup_by_key(|(index, _)| *index);
        uris
    }

    fn header_footers(&self, kind: HeaderFooterKind) -> HeaderFooters {
        if !self.options.load_headers_footers {
            return HeaderFooters::new();
        }
        self.header_footer_uris(kind)
            .into_iter()
            .filter_map(|(index, uri)| {
                let root = optional_part(self.pkg, &uri, self.diagnostics)?;
                let rels = part_relationships(self.pkg, &uri, self.diagnostics);
                let mut builder = DocumentBuilder::new(uri.as_str(), &rels, self.diagnostics);
                Some(HeaderFooter::from_xml(&root, kind, index, &mut builder))
            })
            .collect()
    }

    fn media(&self) -> Media {
        if !self.options.load_media {
            return Media::new();
        }
        let mut owned: Vec<Relationships> = Vec::new();
        if self.options.load_headers_footers {
            for kind in [HeaderFooterKind::Header, HeaderFooterKind::Footer] {
                for (_, uri) in self.header_footer_uris(kind) {
                    owned.push(part_relationships(self.pkg, &uri, self.diagnostics));
                }
            }
        }
        let mut sources: Vec<&Relationships> = vec![self.main.relationships()];
        sources.extend(owned.iter());
        Media::load(self.pkg, &sources, self.diagnostics)
    }

    fn metadata(&self) -> Metadata {
        core_properties_uri(self.pkg)
            .and_then(|uri| optional_part(self.pkg, &uri, self.diagnostics))
            .map(|root| parse_core_properties(&root))
            .unwrap_or_default()
    }
}

/// Everything parsed from one package.
///
/// The renderer borrows this read-only; all state needed for one render
/// pass (numbering counters) is created per call.
#[derive(Debug)]
pub struct ParsedDocument {
    part_name: String,
    document: Document,
    styles: StyleRegistry,
    numbering: Numbering,
    relationships: Relationships,
    fonts: FontTable,
    theme: Option<Theme>,
    comments: Comments,
    footnotes: Notes,
    endnotes: Notes,
    headers: HeaderFooters,
    footers: HeaderFooters,
    media: Media,
    metadata: Metadata,
    diagnostics: Vec<Diagnostic>,
}

impl ParsedDocument {
    /// Wrap a document tree built in memory. Every resource collection is
    /// empty, so rendering uses direct formatting only.
    pub fn from_document(document: Document) -> Self {
        Self {
            part_name: part_name::DOCUMENT.to_string(),
            document,
            styles: StyleRegistry::new(),
            numbering: Numbering::new(),
            relationships: Relationships::new("/word"),
            fonts: FontTable::new(),
            theme: None,
            comments: Comments::new(),
            footnotes: Notes::new(NoteKind::Footnote),
            endnotes: Notes::new(NoteKind::Endnote),
            headers: HeaderFooters::new(),
            footers: HeaderFooters::new(),
            media: Media::new(),
            metadata: Metadata::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Part name of the main document.
    #[inline]
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    #[inline]
    pub fn numbering(&self) -> &Numbering {
        &self.numbering
    }

    /// Relationships of the main document part.
    #[inline]
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    #[inline]
    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    #[inline]
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    #[inline]
    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    #[inline]
    pub fn footnotes(&self) -> &Notes {
        &self.footnotes
    }

    #[inline]
    pub fn endnotes(&self) -> &Notes {
        &self.endnotes
    }

    #[inline]
    pub fn headers(&self) -> &HeaderFooters {
        &self.headers
    }

    #[inline]
    pub fn footers(&self) -> &HeaderFooters {
        &self.footers
    }

    #[inline]
    pub fn media(&self) -> &Media {
        &self.media
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Degradations recorded while parsing.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render paginated HTML, recording render failures in `diagnostics`.
    pub fn render_html(&self, options: &HtmlOptions, diagnostics: &Diagnostics) -> String {
        crate::html::render_document(self, options, diagnostics)
    }
}
