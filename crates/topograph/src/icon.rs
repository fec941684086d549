//! Icon resolution.
//!
//! Every component resolves once to an [`IconSource`] before any markup is
//! produced. The source decides how the assembler emits the icon:
//!
//! | Situation                             | Source                    | Definition |
//! |---------------------------------------|---------------------------|------------|
//! | no fetcher                            | `UrlReference`            | `<svg>` wrapping an `<image>`, shared by locator |
//! | fetcher returned bytes                | `SharedInlineContent`     | `<svg>` wrapping the fetched markup |
//! | fetcher returned nothing for the icon | `DirectInlineReference`   | none, a plain `<image>` at the placement |
//!
//! Definition identifiers are `icon-1`, `icon-2`, … assigned in lexical order
//! of component name.

use std::{collections::HashMap, error::Error};

use indexmap::IndexMap;
use log::{debug, info};

use topograph_core::topology::Topology;

use crate::error::TopographError;

/// Prefix of icon definition identifiers.
pub const ICON_ID_PREFIX: &str = "icon-";

/// Error reported by an [`IconFetcher`]. Surfaced unchanged to the caller.
pub type FetchError = Box<dyn Error + Send + Sync>;

/// Raw icon bytes keyed by component name.
pub type FetchedIcons = HashMap<String, Vec<u8>>;

/// Capability to fetch icon content for a whole topology at once.
///
/// The renderer calls [`fetch_icons`](Self::fetch_icons) exactly once per
/// render, before anything else. Timeouts and retries are the fetcher's
/// concern.
pub trait IconFetcher {
    fn fetch_icons(&self, topology: &Topology) -> Result<FetchedIcons, FetchError>;
}

impl<F> IconFetcher for F
where
    F: Fn(&Topology) -> Result<FetchedIcons, FetchError>,
{
    fn fetch_icons(&self, topology: &Topology) -> Result<FetchedIcons, FetchError> {
        self(topology)
    }
}

/// How a component's icon is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// A shared definition referencing the icon URL.
    UrlReference { id: String, url: String },
    /// A definition embedding fetched markup.
    SharedInlineContent { id: String, content: String },
    /// No definition; the placement references the URL directly.
    DirectInlineReference { url: String },
}

impl IconSource {
    /// The identifier of the definition this source refers to, if any.
    pub fn definition_id(&self) -> Option<&str> {
        match self {
            Self::UrlReference { id, .. } | Self::SharedInlineContent { id, .. } => Some(id),
            Self::DirectInlineReference { .. } => None,
        }
    }
}

/// The body of an icon definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionContent {
    /// An external image, loaded when the document is displayed.
    Url(String),
    /// Markup of the root element of a fetched icon.
    Markup(String),
}

/// A reusable icon definition, emitted once in the definitions section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDefinition {
    id: String,
    content: DefinitionContent,
}

impl IconDefinition {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &DefinitionContent {
        &self.content
    }
}

/// Icon sources of every component and the definitions they refer to.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIcons {
    sources: IndexMap<String, IconSource>,
    definitions: Vec<IconDefinition>,
}

impl ResolvedIcons {
    /// The icon source of the named component.
    pub fn source(&self, component: &str) -> Option<&IconSource> {
        self.sources.get(component)
    }

    /// Definitions in identifier order.
    pub fn definitions(&self) -> &[IconDefinition] {
        &self.definitions
    }

    fn next_id(&self) -> String {
        format!("{ICON_ID_PREFIX}{}", self.definitions.len() + 1)
    }
}

/// Calls the fetcher, if any, mapping its failure to [`TopographError::Fetch`].
///
/// Returns `None` when no fetcher is supplied.
pub fn fetch(
    topology: &Topology,
    fetcher: Option<&dyn IconFetcher>,
) -> Result<Option<FetchedIcons>, TopographError> {
    let Some(fetcher) = fetcher else {
        return Ok(None);
    };

    info!(components = topology.len(); "Fetching icons");
    let icons = fetcher
        .fetch_icons(topology)
        .map_err(TopographError::Fetch)?;
    debug!(fetched = icons.len(); "Icons fetched");

    Ok(Some(icons))
}

/// Extracts the root element markup of a fetched icon.
///
/// The XML declaration, doctype and comments around the root are dropped.
fn root_markup(component: &str, bytes: &[u8]) -> Result<String, TopographError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| TopographError::invalid_icon(component, err))?;
    // Exported icons often carry a DOCTYPE; its declarations are not needed.
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)
        .map_err(|err| TopographError::invalid_icon(component, err))?;

    Ok(text[document.root_element().range()].to_string())
}

/// Resolves the icon source of every component.
///
/// - `icon_url` maps an icon locator to the URL it is served from.
/// - `fetched` is the fetcher's result, or `None` when no fetcher was supplied.
///
/// # Errors
///
/// Returns [`TopographError::InvalidIcon`] when fetched bytes are not
/// well-formed UTF-8 XML.
pub fn resolve_icons(
    topology: &Topology,
    icon_url: &dyn Fn(&str) -> String,
    fetched: Option<&FetchedIcons>,
) -> Result<ResolvedIcons, TopographError> {
    let mut resolved = ResolvedIcons::default();
    // Definition id per icon locator, for URL references.
    let mut by_locator: HashMap<&str, String> = HashMap::new();

    for component in topology.components() {
        let url = icon_url(component.icon());

        let source = match fetched {
            None => {
                let id = match by_locator.get(component.icon()) {
                    Some(id) => id.clone(),
                    None => {
                        let id = resolved.next_id();
                        resolved.definitions.push(IconDefinition {
                            id: id.clone(),
                            content: DefinitionContent::Url(url.clone()),
                        });
                        by_locator.insert(component.icon(), id.clone());
                        id
                    }
                };
                IconSource::UrlReference { id, url }
            }
            Some(icons) => match icons.get(component.name()).filter(|bytes| !bytes.is_empty()) {
                Some(bytes) => {
                    let content = root_markup(component.name(), bytes)?;
                    let id = resolved.next_id();
                    resolved.definitions.push(IconDefinition {
                        id: id.clone(),
                        content: DefinitionContent::Markup(content.clone()),
                    });
                    IconSource::SharedInlineContent { id, content }
                }
                None => IconSource::DirectInlineReference { url },
            },
        };

        debug!(component = component.name(), source:? = source; "Icon resolved");
        resolved
            .sources
            .insert(component.name().to_string(), source);
    }

    Ok(resolved)
}
