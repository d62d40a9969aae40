//! Coverage resolver.
//!
//! Pure decision function: given an asset's current subtitle inventory, the
//! required language list, and the capability graph, produce the ordered
//! action plan that reaches full coverage. No I/O happens here; plans are
//! recomputed from on-disk truth on every run, which is what makes the whole
//! pipeline idempotent.

use std::fmt;

use crate::asset::SubtitleInventory;
use crate::capability::CapabilityGraph;
use crate::language::LanguageCode;

/// Why a language could not be (or was not) produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No capability edge reaches this language from any held subtitle
    NoTranslationPath,
    /// Audio extraction failed for the asset
    ExtractionFailed,
    /// The transcription service call failed
    TranscriptionFailed,
    /// The translation engine failed at call time
    TranslationFailed,
    /// A prerequisite action for this language failed earlier in the plan
    UpstreamFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoTranslationPath => "no translation path",
            Self::ExtractionFailed => "audio extraction failed",
            Self::TranscriptionFailed => "transcription failed",
            Self::TranslationFailed => "translation failed",
            Self::UpstreamFailed => "upstream action failed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Produce subtitle content for `target` directly from the asset's audio
    Transcribe { target: LanguageCode },
    /// Produce subtitle content for `target` from existing content at `source`
    Translate {
        source: LanguageCode,
        target: LanguageCode,
    },
    /// No action can produce `target`
    Unresolved {
        target: LanguageCode,
        reason: FailureReason,
    },
}

impl Action {
    pub fn target(&self) -> &LanguageCode {
        match self {
            Self::Transcribe { target } => target,
            Self::Translate { target, .. } => target,
            Self::Unresolved { target, .. } => target,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transcribe { target } => write!(f, "transcribe -> {}", target),
            Self::Translate { source, target } => write!(f, "translate {} -> {}", source, target),
            Self::Unresolved { target, reason } => {
                write!(f, "unresolved {} ({})", target, reason)
            }
        }
    }
}

/// Ordered sequence of actions for one asset
pub type ActionPlan = Vec<Action>;

/// Compute the action plan that completes subtitle coverage for one asset.
///
/// Deterministic given identical inputs: missing languages are handled in
/// `required` priority order, and among several viable translation sources
/// the one earliest in `required` wins (sources outside `required` fall back
/// to lexicographic order). Duplicate or already-satisfied entries in
/// `required` are dropped up front.
pub fn resolve(
    inventory: &SubtitleInventory,
    required: &[LanguageCode],
    graph: &CapabilityGraph,
) -> ActionPlan {
    let mut missing: Vec<&LanguageCode> = Vec::new();
    for language in required {
        if !inventory.contains(language) && !missing.contains(&language) {
            missing.push(language);
        }
    }

    if missing.is_empty() {
        return Vec::new();
    }

    if inventory.is_empty() {
        // No subtitles at all: transcription is the costly step, so it runs
        // exactly once, into the pivot, and every other language derives from
        // the pivot's output.
        let pivot = missing[0];
        let mut plan = vec![Action::Transcribe {
            target: pivot.clone(),
        }];

        for language in &missing[1..] {
            if graph.has_edge(pivot, language) {
                plan.push(Action::Translate {
                    source: pivot.clone(),
                    target: (*language).clone(),
                });
            } else {
                plan.push(Action::Unresolved {
                    target: (*language).clone(),
                    reason: FailureReason::NoTranslationPath,
                });
            }
        }

        return plan;
    }

    let mut plan = Vec::with_capacity(missing.len());

    for language in missing {
        match select_source(inventory, required, graph, language) {
            Some(source) => plan.push(Action::Translate {
                source,
                target: language.clone(),
            }),
            None => plan.push(Action::Unresolved {
                target: language.clone(),
                reason: FailureReason::NoTranslationPath,
            }),
        }
    }

    plan
}

/// Pick the translation source for `target` among held languages with a
/// capability edge to it. Priority position in `required` breaks ties;
/// languages absent from `required` sort after all listed ones, by code.
fn select_source(
    inventory: &SubtitleInventory,
    required: &[LanguageCode],
    graph: &CapabilityGraph,
    target: &LanguageCode,
) -> Option<LanguageCode> {
    inventory
        .languages()
        .filter(|source| graph.has_edge(source, target))
        .min_by_key(|source| {
            let priority = required
                .iter()
                .position(|l| l == *source)
                .unwrap_or(usize::MAX);
            (priority, (*source).clone())
        })
        .cloned()
}
