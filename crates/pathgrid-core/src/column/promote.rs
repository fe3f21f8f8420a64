use crate::{
    obs::sink::PromoteKind,
    path::{Path, Segment, resolve},
    value::Value,
};

///
/// KeyCandidate
///
/// Scalar sibling field offered as an identifying key, with its rendered
/// value in the element being promoted from.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyCandidate {
    pub field: String,
    pub value: String,
}

///
/// KeyChoiceRequest
///
/// Raised when promoting a member of an array element: the caller picks
/// a sibling key that identifies the element, or keeps the position.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyChoiceRequest {
    /// Path as browsed, including the positional `[N]`.
    pub path: Path,
    /// Segments addressing the array; empty when the record is the array.
    pub array: Vec<Segment>,
    pub index: usize,
    /// Segments after the array element.
    pub suffix: Vec<Segment>,
    pub candidates: Vec<KeyCandidate>,
}

impl KeyChoiceRequest {
    /// Path keyed by `field` instead of position, or `None` if `field` is
    /// not a candidate.
    #[must_use]
    pub fn keyed_path(&self, field: &str) -> Option<Path> {
        let candidate = self.candidates.iter().find(|c| c.field == field)?;

        let mut segments = self.array.clone();
        segments.push(Segment::filter(&candidate.field, &candidate.value));
        segments.extend_from_slice(&self.suffix);

        Path::from_segments(segments)
    }
}

///
/// KeyChoice
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyChoice {
    Positional,
    Key(String),
}

///
/// KeyChooser
///
/// Collaborator that resolves promotion ambiguity, typically by asking the
/// user. Any `Fn(&KeyChoiceRequest) -> KeyChoice` closure is a chooser.
///

pub trait KeyChooser {
    fn choose(&self, request: &KeyChoiceRequest) -> KeyChoice;
}

impl<F> KeyChooser for F
where
    F: Fn(&KeyChoiceRequest) -> KeyChoice,
{
    fn choose(&self, request: &KeyChoiceRequest) -> KeyChoice {
        self(request)
    }
}

///
/// Positional
///
/// Always keeps the positional index.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Positional;

impl KeyChooser for Positional {
    fn choose(&self, _: &KeyChoiceRequest) -> KeyChoice {
        KeyChoice::Positional
    }
}

///
/// PreferredKeys
///
/// Picks the first listed field that is a candidate, else positional.
/// Suits hosts without an interactive prompt.
///

#[derive(Clone, Debug, Default)]
pub struct PreferredKeys(pub Vec<String>);

impl KeyChooser for PreferredKeys {
    fn choose(&self, request: &KeyChoiceRequest) -> KeyChoice {
        self.0
            .iter()
            .find(|field| request.candidates.iter().any(|c| &c.field == *field))
            .map_or(KeyChoice::Positional, |field| KeyChoice::Key(field.clone()))
    }
}

/// Build the key choice for promoting `path`, if one applies.
///
/// Only the immediate parent is considered: it must be an array element
/// (`...[N]`) resolving to an object with at least one scalar member other
/// than the promoted key.
#[must_use]
pub fn key_choice_request(record: &Value, path: &Path) -> Option<KeyChoiceRequest> {
    let segments = path.segments();
    let [array @ .., Segment::Index(index), last] = segments else {
        return None;
    };

    let parent = path.parent()?;
    let element = resolve(record, &parent)?.as_object()?;
    let promoted = match last {
        Segment::Key(name) => Some(name.as_str()),
        _ => None,
    };

    let candidates: Vec<KeyCandidate> = element
        .iter()
        .filter(|(field, value)| value.is_scalar() && Some(field.as_str()) != promoted)
        .map(|(field, value)| KeyCandidate {
            field: field.clone(),
            value: value.display_text(),
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(KeyChoiceRequest {
        path: path.clone(),
        array: array.to_vec(),
        index: *index,
        suffix: vec![last.clone()],
        candidates,
    })
}

/// Decide the promoted path for `path` and how it was reached.
pub(crate) fn promoted_path(
    record: &Value,
    path: &Path,
    chooser: &dyn KeyChooser,
) -> (Path, PromoteKind) {
    let Some(request) = key_choice_request(record, path) else {
        let kind = if is_array_member(path) {
            PromoteKind::Positional
        } else {
            PromoteKind::Direct
        };
        return (path.clone(), kind);
    };

    match chooser.choose(&request) {
        KeyChoice::Positional => (path.clone(), PromoteKind::Positional),
        KeyChoice::Key(field) => match request.keyed_path(&field) {
            Some(keyed) => (keyed, PromoteKind::Keyed),
            None => {
                tracing::warn!(
                    path = %path,
                    field = %field,
                    "column: chosen key is not a candidate; keeping position"
                );
                (path.clone(), PromoteKind::Positional)
            }
        },
    }
}

fn is_array_member(path: &Path) -> bool {
    matches!(path.segments(), [.., Segment::Index(_), _])
}
