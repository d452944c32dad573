/// The container archive held in memory.
///
/// All archive members are decompressed once when the package is opened and
/// kept as shared [`Bytes`]. After that every access is a pure read, so part
/// parsers may run concurrently against the same package.
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::{part_name, relationship_type};
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::rel::Relationships;
use bytes::Bytes;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

pub struct OpcPackage {
    /// Member data keyed by part name
    parts: HashMap<PackURI, Bytes>,

    /// Lower-cased part name to actual part name, for case-insensitive lookup
    folded: HashMap<String, PackURI>,

    /// Members that could not be decompressed
    unreadable: Vec<String>,
}

impl OpcPackage {
    /// Open a package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use longan::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("document.docx")?;
    /// println!("{} parts", pkg.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a package from raw container bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Load a package from a reader.
    ///
    /// Only a corrupt central directory is an error. A member that fails to
    /// decompress is left out and listed by [`OpcPackage::unreadable_entries`].
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = HashMap::with_capacity(archive.len());
        let mut folded = HashMap::with_capacity(archive.len());
        let mut unreadable = Vec::new();

        for index in 0..archive.len() {
            let mut file = match archive.by_index(index) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!(index, "skipping unreadable archive entry: {}", e);
                    unreadable.push(format!("#{}", index));
                    continue;
                },
            };
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            if let Err(e) = file.read_to_end(&mut data) {
                tracing::warn!(member = %name, "failed to decompress archive entry: {}", e);
                unreadable.push(name);
                continue;
            }

            let uri = PackURI::from_membername(&name);
            folded.insert(uri.as_str().to_ascii_lowercase(), uri.clone());
            parts.insert(uri, Bytes::from(data));
        }

        tracing::debug!(parts = parts.len(), "opened package");
        Ok(Self {
            parts,
            folded,
            unreadable,
        })
    }

    fn resolve(&self, uri: &PackURI) -> Option<&PackURI> {
        if let Some((key, _)) = self.parts.get_key_value(uri) {
            return Some(key);
        }
        self.folded.get(&uri.as_str().to_ascii_lowercase())
    }

    /// Whether a part exists. Part names compare case-insensitively.
    pub fn contains(&self, uri: &PackURI) -> bool {
        self.resolve(uri).is_some()
    }

    /// Raw bytes of a part.
    pub fn blob(&self, uri: &PackURI) -> Option<&Bytes> {
        self.resolve(uri).and_then(|key| self.parts.get(key))
    }

    /// Parse a part into its element tree.
    ///
    /// Returns `Ok(None)` when the part is absent and an error when it exists
    /// but is not well-formed XML.
    pub fn xml_part(&self, uri: &PackURI) -> Result<Option<XmlElement>> {
        match self.blob(uri) {
            Some(data) => XmlElement::parse(data).map(Some),
            None => Ok(None),
        }
    }

    /// Relationships owned by `source`. An absent relationship part yields an
    /// empty collection.
    pub fn relationships(&self, source: &PackURI) -> Result<Relationships> {
        let base_uri = source.base_uri().to_string();
        match self.xml_part(&source.rels_uri())? {
            Some(root) => Ok(Relationships::from_xml(base_uri, &root)),
            None => Ok(Relationships::new(base_uri)),
        }
    }

    /// Package-level relationships (`/_rels/.rels`).
    pub fn package_relationships(&self) -> Result<Relationships> {
        self.relationships(&PackURI::from_membername(PACKAGE_URI))
    }

    /// Part name of the main document, found through the package
    /// relationships with the conventional name as fallback.
    pub fn main_document_uri(&self) -> PackURI {
        if let Ok(rels) = self.package_relationships()
            && let Some(rel) = rels.by_type(relationship_type::OFFICE_DOCUMENT)
            && let Ok(uri) = rel.target_partname()
            && self.contains(&uri)
        {
            return uri;
        }
        PackURI::from_membername(part_name::DOCUMENT)
    }

    /// All part names, sorted.
    pub fn part_names(&self) -> Vec<&PackURI> {
        let mut names: Vec<&PackURI> = self.parts.keys().collect();
        names.sort();
        names
    }

    /// Members that failed to decompress.
    pub fn unreadable_entries(&self) -> &[String] {
        &self.unreadable
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DocxFixture;

    #[test]
    fn test_open_package() {
        let data = DocxFixture::new("<w:p><w:r><w:t>Test</w:t></w:r></w:p>").build();
        let pkg = OpcPackage::from_bytes(&data).unwrap();

        let main = pkg.main_document_uri();
        assert_eq!(main.as_str(), "/word/document.xml");
        let root = pkg.xml_part(&main).unwrap().unwrap();
        assert_eq!(root.local_name(), "document");
        assert!(pkg.unreadable_entries().is_empty());
    }

    #[test]
    fn test_main_document_from_relationship() {
        let data = DocxFixture::without_document()
            .part(
                "_rels/.rels",
                crate::testing::wrap_rels(
                    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/main.xml"/>"#,
                ),
            )
            .part("word/main.xml", crate::testing::wrap_document(""))
            .build();
        let pkg = OpcPackage::from_bytes(&data).unwrap();
        assert_eq!(pkg.main_document_uri().as_str(), "/word/main.xml");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let data = DocxFixture::new("").part("word/Media/Image1.PNG", b"png").build();
        let pkg = OpcPackage::from_bytes(&data).unwrap();
        let uri = PackURI::new("/word/media/image1.png").unwrap();
        assert_eq!(pkg.blob(&uri).map(|b| b.as_ref()), Some(&b"png"[..]));
    }

    #[test]
    fn test_missing_part_and_relationships() {
        let pkg = OpcPackage::from_bytes(&DocxFixture::new("").build()).unwrap();
        let styles = PackURI::new("/word/styles.xml").unwrap();
        assert!(pkg.xml_part(&styles).unwrap().is_none());
        assert!(pkg.relationships(&styles).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_part_is_error() {
        let data = DocxFixture::new("").part("word/styles.xml", "<w:styles><oops>").build();
        let pkg = OpcPackage::from_bytes(&data).unwrap();
        let styles = PackURI::new("/word/styles.xml").unwrap();
        assert!(pkg.xml_part(&styles).is_err());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(OpcPackage::from_bytes(b"definitely not a zip").is_err());
    }

    #[test]
    fn test_open_from_path() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&DocxFixture::new("").build()).unwrap();
        let pkg = OpcPackage::open(file.path()).unwrap();
        assert!(pkg.len() >= 2);
        assert!(!pkg.part_names().is_empty());
    }
}
