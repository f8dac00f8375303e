//! Dispatch engine: multi-codec input to per-component reports

use crate::classify::Classifier;
use crate::constants::{COMPONENT_SEPARATOR, FIELD_SEPARATOR, REPORT_SEPARATOR};
use crate::registry::Registry;
use crate::render::{self, RenderFn};
use crate::types::Diagnostic;
use crate::Result;
use serde::Serialize;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Decoded form of one comma-separated component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentResult {
    /// Component text with whitespace removed
    pub component: String,

    /// Lowercase codec identifier
    pub identifier: String,

    /// Decoder label; `None` when no decoder is registered
    pub label: Option<String>,

    /// Decoder output, in display order
    pub diagnostics: Vec<Diagnostic>,

    #[serde(skip)]
    render: Option<RenderFn>,
}

impl ComponentResult {
    /// True if any entry is an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Render with the decoder's renderer, or the simple one
    pub fn render(&self) -> String {
        let render = self.render.unwrap_or(render::simple);
        render(self.label.as_deref(), &self.diagnostics)
    }
}

/// Results for every component, in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// One result per component
    pub results: Vec<ComponentResult>,
}

impl Report {
    /// Number of components
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if the input had no components
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True if any component reported an error
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(ComponentResult::has_errors)
    }

    /// Render every component, separated by a rule line
    pub fn render(&self) -> String {
        self.results
            .iter()
            .map(ComponentResult::render)
            .collect::<Vec<_>>()
            .join(&format!("{REPORT_SEPARATOR}\n"))
    }
}

/// Registry plus classifier, ready to decode input strings
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    classifier: Classifier,
}

impl Engine {
    /// Create an engine from explicit parts
    pub fn new(registry: Registry, classifier: Classifier) -> Self {
        Self {
            registry,
            classifier,
        }
    }

    /// Engine with every shipped decoder and the DVB classification tables
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            crate::decoders::default_registry()?,
            Classifier::dvb()?,
        ))
    }

    /// The decoder registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The classification tables
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Decode a comma-separated list of codec strings
    ///
    /// Each component is decoded on its own; an unknown or malformed
    /// component never affects its neighbours.
    pub fn dispatch(&self, input: &str) -> Report {
        #[cfg(feature = "logging")]
        debug!("Dispatching codec list {:?}", input);

        let results = input
            .split(COMPONENT_SEPARATOR as char)
            .map(|component| self.decode_component(component))
            .collect();

        Report { results }
    }

    /// Decode a single codec string
    pub fn decode_component(&self, raw: &str) -> ComponentResult {
        let component: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let identifier = identifier_of(&component).to_ascii_lowercase();

        if component.is_empty() {
            return ComponentResult {
                component,
                identifier,
                label: None,
                diagnostics: vec![Diagnostic::error("empty codec string")],
                render: None,
            };
        }

        match self.registry.lookup(&identifier) {
            Some(entry) => {
                #[cfg(feature = "logging")]
                debug!("Decoding {} with {}", component, entry.label());

                let diagnostics = entry.decode(&component, &self.classifier);
                ComponentResult {
                    component,
                    identifier,
                    label: Some(entry.label().to_string()),
                    diagnostics,
                    render: entry.render_fn(),
                }
            }
            None => {
                #[cfg(feature = "logging")]
                warn!("No decoder registered for {}", identifier);

                let diagnostics = vec![Diagnostic::error(format!(
                    "unsupported codec={identifier}"
                ))];
                ComponentResult {
                    component,
                    identifier,
                    label: None,
                    diagnostics,
                    render: None,
                }
            }
        }
    }
}

/// Text before the first `.`, or the whole component
pub fn identifier_of(component: &str) -> &str {
    match memchr::memchr(FIELD_SEPARATOR, component.as_bytes()) {
        Some(pos) => &component[..pos],
        None => component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(component: &str, _: &Classifier) -> Vec<Diagnostic> {
        vec![Diagnostic::normal(component)]
    }

    fn engine() -> Engine {
        let mut builder = Registry::builder();
        builder.register(&["echo"], "Echo", echo, Some(render::tabular));
        Engine::new(builder.build(), Classifier::empty())
    }

    #[test]
    fn test_identifier_of() {
        assert_eq!(identifier_of("avc1.64002A"), "avc1");
        assert_eq!(identifier_of("ec-3"), "ec-3");
        assert_eq!(identifier_of(".x"), "");
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let report = engine().dispatch("  echo . 1 ,\techo.2 ");
        assert_eq!(report.len(), 2);
        assert_eq!(report.results[0].component, "echo.1");
        assert_eq!(
            report.results[1].diagnostics,
            vec![Diagnostic::normal("echo.2")]
        );
    }

    #[test]
    fn test_unknown_identifier_is_isolated() {
        let report = engine().dispatch("ECHO.1,nope.2,echo.3");
        assert_eq!(report.len(), 3);
        assert_eq!(report.results[0].label.as_deref(), Some("Echo"));
        assert_eq!(
            report.results[1].diagnostics,
            vec![Diagnostic::error("unsupported codec=nope")]
        );
        assert!(report.results[1].label.is_none());
        assert_eq!(
            report.results[2].diagnostics,
            vec![Diagnostic::normal("echo.3")]
        );
        assert!(report.has_errors());
    }

    #[test]
    fn test_empty_component() {
        let report = engine().dispatch("echo,");
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.results[1].diagnostics,
            vec![Diagnostic::error("empty codec string")]
        );
    }

    #[test]
    fn test_render_uses_entry_renderer() {
        let report = engine().dispatch("echo.1,zzzz");
        assert_eq!(
            report.render(),
            "Echo\n          echo.1\n----\nerror: unsupported codec=zzzz\n"
        );
    }
}
