//! The classification rule engine.
//!
//! A pure function from ingredient evidence to a verdict. Matching is
//! substring-based, not word-boundary-based; existing users depend on
//! exactly this behavior, crude as it is, so it must be preserved.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::product::Evidence;

// ─── Keyword tables ──────────────────────────────────────────────────────────

/// Vegan/vegetarian label markers; any hit forces a halal verdict.
const VEGAN_MARKERS: [&str; 3] = ["vegan", "نباتي", "végane"];

/// Disallowed ingredients, multi-language synonyms. Order matters: the
/// first hit is the one reported.
const HARAM_KEYWORDS: [&str; 22] = [
  "gelatin", "gélatine", "gelatina", "جلاتين", "جيلاتين",
  "e441", "pork", "porc", "خنزير", "lard", "saindoux",
  "alcohol", "alcool", "ethanol", "كحول", "wine", "نبيذ", "beer", "بيرة",
  "rennet", "présure", "منفحة حيوانية",
];

/// Ambiguous ingredients; every hit is reported, in list order.
const DOUBTFUL_KEYWORDS: [&str; 13] = [
  "e120", "cochineal", "carmine", "قرمزي",
  "e471", "e472", "e473", "e481", "e482",
  "emulsifier", "مستحلب", "flavour", "نكهة",
];

/// Additive codes flagged as potentially harmful. Informational only —
/// presence never changes a verdict.
const HARMFUL_E_NUMBERS: [&str; 11] = [
  "E102", "E110", "E120", "E122", "E124", "E129",
  "E211", "E220", "E250", "E251", "E621",
];

// ─── Outcome types ───────────────────────────────────────────────────────────

/// The classification outcome.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
  Halal,
  Doubtful,
  Haram,
}

/// Qualitative certainty of a verdict.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
  High,
  Medium,
  Low,
}

/// The output of [`classify`]; immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
  pub verdict:    Verdict,
  /// At least one entry, ordered by rule priority.
  pub reasons:    Vec<String>,
  pub confidence: Confidence,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Classify one product's evidence.
///
/// Deterministic and total: malformed or missing evidence degrades to the
/// default verdict rather than failing. Rules apply in strict priority
/// order; the first matching rule wins.
pub fn classify(evidence: &Evidence) -> Classification {
  let text = evidence.ingredients_text.to_lowercase();
  let mut reasons = Vec::new();

  // A vegan label overrides everything, including disallowed keywords in
  // the ingredient text.
  let vegan = evidence.labels.iter().any(|label| {
    let label = label.to_lowercase();
    VEGAN_MARKERS.iter().any(|m| label.contains(m))
  });
  if vegan {
    return Classification {
      verdict:    Verdict::Halal,
      reasons:    vec!["Vegan label detected".to_owned()],
      confidence: Confidence::High,
    };
  }

  // First disallowed keyword wins; only that one is reported.
  for keyword in HARAM_KEYWORDS {
    if text.contains(keyword) {
      reasons.push(format!("Found: {keyword}"));
      return Classification {
        verdict: Verdict::Haram,
        reasons,
        confidence: Confidence::High,
      };
    }
  }

  // Doubtful keywords are collected exhaustively, in list order.
  let doubtful: Vec<&str> = DOUBTFUL_KEYWORDS
    .into_iter()
    .filter(|k| text.contains(k))
    .collect();
  if !doubtful.is_empty() {
    reasons.extend(doubtful.into_iter().map(|k| format!("Doubtful: {k}")));
    return Classification {
      verdict: Verdict::Doubtful,
      reasons,
      confidence: Confidence::Medium,
    };
  }

  // Harmful additives annotate the verdict but never change it.
  if !harmful_additives(&evidence.additive_tags).is_empty() {
    reasons.push("Contains potentially harmful additives".to_owned());
  }

  reasons.push("No haram/doubtful markers detected".to_owned());
  Classification {
    verdict: Verdict::Halal,
    reasons,
    confidence: Confidence::Medium,
  }
}

/// Extract the de-duplicated harmful additive codes from raw tags.
///
/// Tags look like `"en:e471"`; the token after the last `:` is the code.
/// Order is first-seen. Surfaced to the caller independently of the
/// verdict computation.
pub fn harmful_additives(additive_tags: &[String]) -> Vec<String> {
  let mut found: Vec<String> = Vec::new();
  for tag in additive_tags {
    let Some(code) = tag.rsplit(':').next() else {
      continue;
    };
    let code = code.to_uppercase();
    if HARMFUL_E_NUMBERS.contains(&code.as_str()) && !found.contains(&code) {
      found.push(code);
    }
  }
  found
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn evidence(text: &str, labels: &[&str], tags: &[&str]) -> Evidence {
    Evidence {
      ingredients_text: text.to_owned(),
      labels:           labels.iter().map(|s| s.to_string()).collect(),
      additive_tags:    tags.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn disallowed_keyword_is_haram_high() {
    let cls = classify(&evidence("Contains gelatin and sugar", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Haram);
    assert_eq!(cls.confidence, Confidence::High);
    assert_eq!(cls.reasons, ["Found: gelatin"]);
  }

  #[test]
  fn matching_is_case_insensitive() {
    let cls = classify(&evidence("PORK broth", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Haram);
    assert_eq!(cls.reasons, ["Found: pork"]);
  }

  #[test]
  fn first_keyword_in_list_order_is_reported() {
    // "lard" appears earlier in the text but "gelatin" earlier in the
    // list; list order decides.
    let cls = classify(&evidence("lard, then gelatin", &[], &[]));
    assert_eq!(cls.reasons, ["Found: gelatin"]);
  }

  #[test]
  fn vegan_label_overrides_disallowed_keywords() {
    let cls =
      classify(&evidence("gelatin, pork, wine", &["en:vegan"], &[]));
    assert_eq!(cls.verdict, Verdict::Halal);
    assert_eq!(cls.confidence, Confidence::High);
    assert_eq!(cls.reasons, ["Vegan label detected"]);
  }

  #[test]
  fn vegan_label_matches_any_case_and_language() {
    for label in ["VEGAN friendly", "en:végane", "نباتي"] {
      let cls = classify(&evidence("water", &[label], &[]));
      assert_eq!(cls.verdict, Verdict::Halal, "label {label:?}");
    }
  }

  #[test]
  fn doubtful_collects_all_matches_in_list_order() {
    let cls = classify(&evidence("water, carmine, E471, e120", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Doubtful);
    assert_eq!(cls.confidence, Confidence::Medium);
    assert_eq!(
      cls.reasons,
      ["Doubtful: e120", "Doubtful: carmine", "Doubtful: e471"]
    );
  }

  #[test]
  fn single_doubtful_code() {
    let cls = classify(&evidence("water, salt, E471", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Doubtful);
    assert_eq!(cls.reasons, ["Doubtful: e471"]);
  }

  #[test]
  fn clean_text_is_halal_medium_with_default_reason() {
    let cls = classify(&evidence("water, salt", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Halal);
    assert_eq!(cls.confidence, Confidence::Medium);
    assert_eq!(cls.reasons, ["No haram/doubtful markers detected"]);
  }

  #[test]
  fn empty_text_falls_through_to_default() {
    let cls = classify(&evidence("", &[], &[]));
    assert_eq!(cls.verdict, Verdict::Halal);
    assert_eq!(cls.reasons, ["No haram/doubtful markers detected"]);
  }

  #[test]
  fn harmful_additive_annotates_without_changing_verdict() {
    let cls = classify(&evidence("water, salt", &[], &["en:e102"]));
    assert_eq!(cls.verdict, Verdict::Halal);
    assert_eq!(cls.confidence, Confidence::Medium);
    assert_eq!(
      cls.reasons,
      [
        "Contains potentially harmful additives",
        "No haram/doubtful markers detected"
      ]
    );
  }

  #[test]
  fn extraction_uppercases_and_dedupes() {
    let tags: Vec<String> =
      ["en:e102", "fr:e102", "en:e330"].map(String::from).into();
    assert_eq!(harmful_additives(&tags), ["E102"]);
  }

  #[test]
  fn extraction_requires_exact_code_match() {
    let tags: Vec<String> = ["en:e1021"].map(String::from).into();
    assert!(harmful_additives(&tags).is_empty());
  }

  #[test]
  fn extraction_handles_untagged_codes() {
    let tags = vec!["e621".to_owned()];
    assert_eq!(harmful_additives(&tags), ["E621"]);
  }
}
