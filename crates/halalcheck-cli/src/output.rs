//! Line-oriented rendering and the localized message strings.

use halalcheck_core::{
  Error,
  classify::Verdict,
  history::HistoryStats,
  prefs::Language,
  record::ScanRecord,
};

// ─── Messages ─────────────────────────────────────────────────────────────────

/// The subset of the app's translation table the CLI needs.
pub struct Messages {
  pub not_found:        &'static str,
  pub network_error:    &'static str,
  pub added_favorite:   &'static str,
  pub removed_favorite: &'static str,
  pub cache_cleared:    &'static str,
  pub history_cleared:  &'static str,
  pub no_history:       &'static str,
  pub no_favorites:     &'static str,
  pub ingredients:      &'static str,
  pub harmful:          &'static str,
  pub total_scans:      &'static str,
}

const AR: Messages = Messages {
  not_found:        "المنتج غير موجود",
  network_error:    "خطأ في الاتصال",
  added_favorite:   "إضافة للمفضلة",
  removed_favorite: "إزالة من المفضلة",
  cache_cleared:    "تم مسح الذاكرة المؤقتة",
  history_cleared:  "تم مسح السجل",
  no_history:       "لا يوجد سجل",
  no_favorites:     "لا توجد منتجات مفضلة",
  ingredients:      "المكوّنات",
  harmful:          "مضافات ضارة",
  total_scans:      "إجمالي الفحوصات",
};

const EN: Messages = Messages {
  not_found:        "Product not found",
  network_error:    "Network error",
  added_favorite:   "Added to favorites",
  removed_favorite: "Removed from favorites",
  cache_cleared:    "Cache cleared",
  history_cleared:  "History cleared",
  no_history:       "No history",
  no_favorites:     "No favorite products",
  ingredients:      "Ingredients",
  harmful:          "Harmful Additives",
  total_scans:      "Total Scans",
};

pub fn messages(lang: Language) -> &'static Messages {
  match lang {
    Language::Ar => &AR,
    Language::En => &EN,
  }
}

pub fn verdict_label(verdict: Verdict, lang: Language) -> &'static str {
  match (verdict, lang) {
    (Verdict::Halal, Language::Ar) => "حلال ✓",
    (Verdict::Doubtful, Language::Ar) => "مشكوك فيه ⚠",
    (Verdict::Haram, Language::Ar) => "حرام ✗",
    (Verdict::Halal, Language::En) => "Halal ✓",
    (Verdict::Doubtful, Language::En) => "Doubtful ⚠",
    (Verdict::Haram, Language::En) => "Haram ✗",
  }
}

pub fn lookup_failure(err: &Error, lang: Language) -> &'static str {
  let msgs = messages(lang);
  match err {
    Error::NotFound(_) => msgs.not_found,
    _ => msgs.network_error,
  }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

/// Full card for one completed check.
pub fn print_record(record: &ScanRecord, lang: Language, favorite: bool) {
  let msgs = messages(lang);
  let p = &record.product;

  let star = if favorite { " ★" } else { "" };
  println!("{}{star}", p.display_name(lang));
  if let Some(brands) = p.brands.as_deref() {
    println!("{brands}");
  }

  println!();
  println!("{}", verdict_label(record.classification.verdict, lang));
  for reason in &record.classification.reasons {
    println!("  - {reason}");
  }

  if !record.harmful_additives.is_empty() {
    println!();
    println!("{}: {}", msgs.harmful, record.harmful_additives.join(", "));
  }

  println!();
  println!("{}:", msgs.ingredients);
  println!("  {}", p.ingredients(lang));

  if let Some(grade) = p.nutriscore_grade.as_deref() {
    println!();
    println!("Nutri-Score: {}", grade.to_uppercase());
  }
  if let Some(nova) = p.nova_group {
    println!("NOVA: {nova}");
  }
}

/// One line per record, for history and favorites listings.
pub fn print_records(records: &[ScanRecord], lang: Language, empty: &str) {
  if records.is_empty() {
    println!("{empty}");
    return;
  }
  for record in records {
    println!(
      "{}  {:>13}  [{}]  {}",
      record.recorded_at.format("%Y-%m-%d"),
      record.code,
      record.classification.verdict,
      record.product.display_name(lang),
    );
  }
}

pub fn print_stats(stats: &HistoryStats, lang: Language) {
  let msgs = messages(lang);
  println!("{}: {}", msgs.total_scans, stats.total);
  println!("  {}: {}", verdict_label(Verdict::Halal, lang), stats.halal);
  println!(
    "  {}: {}",
    verdict_label(Verdict::Doubtful, lang),
    stats.doubtful
  );
  println!("  {}: {}", verdict_label(Verdict::Haram, lang), stats.haram);
}
