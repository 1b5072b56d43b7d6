use crate::traits::FieldValues;

///
/// SearchProgram
///
/// Slot-resolved free-text search. Field names are resolved once per
/// engine; evaluation reads slots only. A record matches when any searched
/// field contains the needle, ignoring case. The needle is matched as
/// written, surrounding spaces included; a blank needle matches all.
///

#[derive(Clone, Debug)]
pub(crate) struct SearchProgram<'a> {
    needle: Option<String>,
    slots: &'a [usize],
}

impl<'a> SearchProgram<'a> {
    #[must_use]
    pub(crate) fn compile(text: &str, slots: &'a [usize]) -> Self {
        // whitespace is only inspected to spot a blank needle
        let needle = (!text.trim().is_empty()).then(|| text.to_lowercase());

        Self { needle, slots }
    }

    #[must_use]
    pub(crate) const fn is_match_all(&self) -> bool {
        self.needle.is_none()
    }

    #[must_use]
    pub(crate) fn matches<R: FieldValues>(&self, record: &R) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        self.slots.iter().any(|slot| {
            record
                .get_value_by_index(*slot)
                .is_some_and(|value| value.contains_folded(needle))
        })
    }
}
