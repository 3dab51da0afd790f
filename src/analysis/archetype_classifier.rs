use crate::{
    domain::{PatternKind, WaveSequence},
    models::{Archetype, ArchetypeLabel, ParentWave, XWaveKind},
};

/// Names the structure behind a hyphen-joined wave-count sequence.
/// With a parent wave the result is annotated with that wave's role ("Zigzag = Minor A").
/// Text that is not a valid sequence is returned verbatim as `Unrecognized`.
pub fn classify_archetype(
    sequence: &str,
    kinds: &[PatternKind],
    parent: Option<&ParentWave>,
) -> ArchetypeLabel {
    let archetype = match sequence.parse::<WaveSequence>() {
        Ok(seq) => classify_sequence(&seq, kinds),
        Err(_) => Archetype::Unrecognized(sequence.trim().to_string()),
    };
    ArchetypeLabel {
        archetype,
        parent_role: parent.map(ParentWave::role),
    }
}

/// Typed core of the classifier. `kinds` may be shorter or longer than the sequence.
pub fn classify_sequence(seq: &WaveSequence, kinds: &[PatternKind]) -> Archetype {
    let second = kinds.get(1).copied();

    match seq.counts() {
        [5, 3, 5, 3, 5] => Archetype::Impulse,
        [5, 3, 5] => Archetype::Zigzag,
        [3, 3, 5] => match second {
            Some(PatternKind::Triangle) => Archetype::FlatTriangleB,
            _ => Archetype::Flat,
        },
        [3, 5, 5] | [3, 5, 3] => Archetype::Wxy {
            x: match second {
                Some(PatternKind::Triangle) => Some(XWaveKind::Triangle),
                Some(PatternKind::Diagonal) => Some(XWaveKind::Diagonal),
                _ => None,
            },
        },
        [3, 3, 3] => Archetype::Wxy { x: None },
        [3, 3, 3, 3, 3] => {
            let all_corrective = kinds.len() == 5 && kinds.iter().all(|k| k.wave_count() == 3);
            if all_corrective {
                Archetype::Triangle
            } else {
                Archetype::Wxyxz
            }
        }
        [5, 3] => Archetype::ImpulseStart,
        [3, 3] => Archetype::WaveWX,
        [5] => Archetype::SingleMotive,
        [3] => Archetype::SingleCorrection,
        _ => single_kind_shape(kinds).unwrap_or_else(|| Archetype::Unrecognized(seq.to_string())),
    }
}

fn single_kind_shape(kinds: &[PatternKind]) -> Option<Archetype> {
    match kinds {
        [PatternKind::Triangle] => Some(Archetype::Triangle),
        [PatternKind::Diagonal] => Some(Archetype::Diagonal),
        _ => None,
    }
}
