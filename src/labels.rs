// English label resolution via an optional translation table.
use crate::types::ComplaintRecord;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Translation {
    category_en: String,
    subcategory_en: String,
}

/// Translations keyed by category, then subcategory.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, HashMap<String, Translation>>,
    len: usize,
}

impl TranslationTable {
    /// Add an entry unless the key is already present. Returns `false` for a
    /// duplicate key.
    pub fn insert(
        &mut self,
        category: String,
        subcategory: String,
        category_en: String,
        subcategory_en: String,
    ) -> bool {
        let by_subcategory = self.entries.entry(category).or_default();
        if by_subcategory.contains_key(&subcategory) {
            return false;
        }
        by_subcategory.insert(
            subcategory,
            Translation {
                category_en,
                subcategory_en,
            },
        );
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn get(&self, category: &str, subcategory: &str) -> Option<&Translation> {
        self.entries.get(category)?.get(subcategory)
    }
}

/// Fill `category_en`/`subcategory_en` on every record.
///
/// Each field falls back to its original value independently: a matching
/// entry with a blank `subcategory_en` still supplies `category_en`.
pub fn resolve(
    records: Vec<ComplaintRecord>,
    translations: Option<&TranslationTable>,
) -> Vec<ComplaintRecord> {
    let Some(table) = translations else {
        return records
            .into_iter()
            .map(|mut r| {
                r.category_en = r.category.clone();
                r.subcategory_en = r.subcategory.clone();
                r
            })
            .collect();
    };

    let mut matched = 0usize;
    let resolved: Vec<ComplaintRecord> = records
        .into_iter()
        .map(|mut r| {
            let hit = table.get(&r.category, &r.subcategory);
            if hit.is_some() {
                matched += 1;
            }
            r.category_en = match hit {
                Some(t) if !t.category_en.is_empty() => t.category_en.clone(),
                _ => r.category.clone(),
            };
            r.subcategory_en = match hit {
                Some(t) if !t.subcategory_en.is_empty() => t.subcategory_en.clone(),
                _ => r.subcategory.clone(),
            };
            r
        })
        .collect();
    debug!(
        "translated {} of {} rows",
        matched,
        resolved.len()
    );
    resolved
}
