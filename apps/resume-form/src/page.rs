//! UI handles for the resume page: the output region, the user-description
//! block and the two download links.
//!
//! Each region is overwritten wholesale by the submission handler; nothing is
//! patched incrementally.

pub const DESCRIPTION_HEADING: &str = "User Description";
/// Link target used while a link is hidden.
pub const NEUTRAL_HREF: &str = "#";

/// What the output region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputContent {
    #[default]
    Empty,
    /// Progress text shown while a request is in flight.
    Placeholder(String),
    /// Generated resume text, shown preformatted.
    Preformatted(String),
    /// One error line per validation entry, under an "Error:" heading.
    ValidationErrors(Vec<String>),
    /// A single error line, already prefixed.
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRegion {
    content: OutputContent,
}

impl OutputRegion {
    pub fn show(&mut self, content: OutputContent) {
        self.content = content;
    }

    pub fn content(&self) -> &OutputContent {
        &self.content
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionRegion {
    visible: bool,
    text: Option<String>,
}

impl DescriptionRegion {
    pub fn hide_and_clear(&mut self) {
        self.visible = false;
        self.text = None;
    }

    pub fn reveal(&mut self, text: impl Into<String>) {
        self.visible = true;
        self.text = Some(text.into());
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Which generated document a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Target used when the server does not name one.
    pub fn default_href(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "/download/pdf",
            DocumentKind::Docx => "/download/docx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "Download PDF",
            DocumentKind::Docx => "Download DOCX",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "resume.pdf",
            DocumentKind::Docx => "resume.docx",
        }
    }

    pub fn element_id(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "downloadPdf",
            DocumentKind::Docx => "downloadDocx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    kind: DocumentKind,
    visible: bool,
    href: String,
}

impl DownloadLink {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            visible: false,
            href: NEUTRAL_HREF.to_string(),
        }
    }

    pub fn hide_and_reset(&mut self) {
        self.visible = false;
        self.href = NEUTRAL_HREF.to_string();
    }

    /// Shows the link, pointing at `href` or the kind's default target.
    pub fn reveal(&mut self, href: Option<&str>) {
        self.visible = true;
        self.href = href.unwrap_or(self.kind.default_href()).to_string();
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}

/// All display regions of one page, handed to the submission handler at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandles {
    pub output: OutputRegion,
    pub description: DescriptionRegion,
    pub pdf_link: DownloadLink,
    pub docx_link: DownloadLink,
}

impl PageHandles {
    pub fn new() -> Self {
        Self {
            output: OutputRegion::default(),
            description: DescriptionRegion::default(),
            pdf_link: DownloadLink::new(DocumentKind::Pdf),
            docx_link: DownloadLink::new(DocumentKind::Docx),
        }
    }

    pub fn links(&self) -> [&DownloadLink; 2] {
        [&self.pdf_link, &self.docx_link]
    }

    pub fn any_link_visible(&self) -> bool {
        self.links().iter().any(|link| link.is_visible())
    }
}

impl Default for PageHandles {
    fn default() -> Self {
        Self::new()
    }
}
