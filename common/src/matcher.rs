//! 照合エンジンモジュール
//!
//! 人手入力の（作曲家, 曲名）ペアをカタログの正規エントリへ対応付ける。
//!
//! ## 処理フロー
//! 1. 入力から候補キーを順序付きで生成（全体 → 曲名のみ → 作曲家+形式語）
//! 2. 候補キーの完全一致を優先して検索
//! 3. 見つからなければ単語重なり率によるあいまい照合にフォールバック
//!
//! 照合は純粋関数で、I/Oも共有状態も持たない。「照合なし」は
//! 正常な戻り値であり、エラーにはならない。

use crate::catalog::WorkCatalog;
use crate::types::{MatchResult, QueryInput};
use std::collections::HashSet;

/// あいまい照合の閾値
///
/// カタログキーの非ストップワード語のうち、この割合以上が候補キーと
/// 共通している場合のみ一致とみなす。
pub const MATCH_THRESHOLD: f64 = 0.7;

/// あいまい照合に必要な最小共通語数
///
/// 共通語が1語だけ（例: "piano"）の一致は誤照合の温床になるため
/// 常に不一致とする。
pub const MIN_COMMON_WORDS: usize = 2;

/// 重なり判定から除外するストップワード
const STOP_WORDS: &[&str] = &["no", "op", "in", "major", "minor", "mvt", "movement"];

/// キー生成時に除去する楽章表記（長いものから順に除去する）
const MOVEMENT_MARKERS: &[&str] = &["all movements", "movement", "mvt.", "mvt"];

/// 曲名中の形式語 → 追加候補キーのテンプレート
///
/// カタログは楽章ではなく親作品の形式で索引されているため、
/// 曲名に形式語が含まれる場合は「作曲家 + 形式語」の候補も試す。
/// 配列順がそのまま候補キーの試行順になる。
const FORM_WORD_KEYS: &[(&str, &[&str])] = &[
    ("sonata", &["sonata"]),
    ("symphony", &["symphony"]),
    ("concerto", &["concerto"]),
    ("trio", &["trio"]),
    ("quartet", &["quartet"]),
    ("suite", &["suite"]),
    ("prelude", &["prelude"]),
    ("fugue", &["fugue", "well-tempered clavier"]),
    ("variation", &["variation"]),
    ("brandenburg", &["brandenburg"]),
    ("gavotte", &["gavotte"]),
    ("french suite", &["french suite"]),
    ("cello suite", &["cello suite"]),
    ("novelletten", &["novelletten"]),
    ("four seasons", &["four seasons"]),
    ("winter", &["winter"]),
    ("summer", &["summer"]),
    ("anna magdalena", &["anna magdalena"]),
    ("wtc", &["wtc", "well-tempered clavier"]),
];

/// 検索キーを正規化する
///
/// 小文字化し、楽章表記を除去したうえで、英数字以外をすべて空白に
/// 置き換えて連続空白を1つにまとめる。カタログ側のキーにも登録時に
/// 同じ正規化が適用されるため、完全一致が表記の違いで取りこぼされる
/// ことはない。
pub fn normalize_key(raw: &str) -> String {
    let mut s = raw.to_lowercase();
    for marker in MOVEMENT_MARKERS {
        s = s.replace(marker, " ");
    }

    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 候補キーを生成順に返す（重複は除去）
///
/// - キーA: 「作曲家 + 曲名」全体
/// - キーB: 曲名のみ
/// - キーC: 曲名に形式語が含まれる場合の「作曲家 + 形式語」
///
/// 具体的なキーほど先に試されるため、完全指定のエントリが
/// 粗いエントリより優先される。
pub fn candidate_keys(composer: &str, title: &str) -> Vec<String> {
    let mut keys = Vec::new();

    push_unique(&mut keys, normalize_key(&format!("{} {}", composer, title)));
    push_unique(&mut keys, normalize_key(title));

    let title_lower = title.to_lowercase();
    for (trigger, templates) in FORM_WORD_KEYS {
        if title_lower.contains(trigger) {
            for template in templates.iter() {
                push_unique(&mut keys, normalize_key(&format!("{} {}", composer, template)));
            }
        }
    }

    keys
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !key.is_empty() && !keys.contains(&key) {
        keys.push(key);
    }
}

/// ストップワードを除いた単語集合
fn content_words(key: &str) -> HashSet<&str> {
    key.split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .collect()
}

/// 候補キーとカタログキーが十分に重なっているか
///
/// 共通語が[`MIN_COMMON_WORDS`]以上、かつカタログキー語に対する
/// 共通語の割合が[`MATCH_THRESHOLD`]以上のとき一致。
pub fn is_strong_match(candidate_key: &str, mapping_key: &str) -> bool {
    let candidate_words = content_words(candidate_key);
    let mapping_words = content_words(mapping_key);

    if candidate_words.is_empty() || mapping_words.is_empty() {
        return false;
    }

    let common = candidate_words.intersection(&mapping_words).count();
    if common < MIN_COMMON_WORDS {
        return false;
    }

    common as f64 / mapping_words.len() as f64 >= MATCH_THRESHOLD
}

/// 1件を照合する
///
/// 決定的: 同じ入力と同じカタログに対しては常に同じ結果を返す。
/// あいまい照合はカタログの登録順で走査し、最初に条件を満たした
/// エントリを採用する（大域最適ではなく先着優先）。
pub fn match_work(query: &QueryInput, catalog: &WorkCatalog) -> MatchResult {
    let keys = candidate_keys(&query.composer, &query.title);

    // 完全一致を優先
    for key in &keys {
        if let Some(record) = catalog.get(key) {
            return MatchResult {
                input: query.clone(),
                record: Some(record.clone()),
            };
        }
    }

    // あいまい照合フォールバック
    for key in &keys {
        for (mapping_key, record) in catalog.iter() {
            if is_strong_match(key, mapping_key) {
                return MatchResult {
                    input: query.clone(),
                    record: Some(record.clone()),
                };
            }
        }
    }

    MatchResult {
        input: query.clone(),
        record: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkRecord;

    fn query(composer: &str, title: &str) -> QueryInput {
        QueryInput {
            composer: composer.to_string(),
            title: title.to_string(),
            row_number: 1,
        }
    }

    fn record(title: &str) -> WorkRecord {
        WorkRecord {
            canonical_title: title.to_string(),
            composer: "Test, Composer".to_string(),
            url: format!("https://imslp.org/wiki/{}", title.replace(' ', "_")),
            note: None,
        }
    }

    #[test]
    fn test_normalize_key_lowercase_and_punctuation() {
        assert_eq!(
            normalize_key("Symphony No.40 in G minor, mvt. 1"),
            "symphony no 40 in g minor 1"
        );
        assert_eq!(normalize_key("  Piano   Sonata  "), "piano sonata");
        assert_eq!(normalize_key("Hob.XVI:37"), "hob xvi 37");
    }

    #[test]
    fn test_normalize_key_movement_markers() {
        assert_eq!(normalize_key("Symphony No.25 (all movements)"), "symphony no 25");
        assert_eq!(normalize_key("Movement 2"), "2");
        assert_eq!(normalize_key("Mvt 3 Allegro"), "3 allegro");
    }

    #[test]
    fn test_candidate_keys_order() {
        let keys = candidate_keys("Mozart", "Symphony No.40");
        assert_eq!(keys[0], "mozart symphony no 40");
        assert_eq!(keys[1], "symphony no 40");
        assert_eq!(keys[2], "mozart symphony");
    }

    #[test]
    fn test_candidate_keys_multiple_form_words() {
        // "suite"と"gavotte"の両方を含む曲名は両方の形式語キーを生成、
        // 語彙表の順（suiteが先）で並ぶ
        let keys = candidate_keys("Bach", "Gavottes from Orchestral Suite");
        let suite_pos = keys.iter().position(|k| k == "bach suite");
        let gavotte_pos = keys.iter().position(|k| k == "bach gavotte");
        assert!(suite_pos.is_some());
        assert!(gavotte_pos.is_some());
        assert!(suite_pos < gavotte_pos);
    }

    #[test]
    fn test_candidate_keys_wtc_alias() {
        let keys = candidate_keys("Bach", "WTC Book 1");
        assert!(keys.contains(&"bach wtc".to_string()));
        assert!(keys.contains(&"bach well tempered clavier".to_string()));
    }

    #[test]
    fn test_candidate_keys_deduplicated() {
        let keys = candidate_keys("Bach", "Suite");
        let unique: std::collections::HashSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_is_strong_match_requires_two_common_words() {
        // 共通語が"piano"1語だけでは一致しない
        assert!(!is_strong_match("chopin piano works", "beethoven piano sonata 8"));
        assert!(is_strong_match("mozart symphony 40 g 1", "mozart symphony 40"));
    }

    #[test]
    fn test_is_strong_match_threshold_boundary() {
        // カタログキーの非ストップワード語が10語のとき、7語共通(0.7)は
        // 一致し、6語共通(0.6)は一致しない
        let mapping = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        assert!(is_strong_match("alpha beta gamma delta epsilon zeta eta", mapping));
        assert!(!is_strong_match("alpha beta gamma delta epsilon zeta", mapping));

        // 3語キーでは3語共通が必要（ceil(0.7*3) = 3）
        assert!(is_strong_match("brahms horn trio extra", "brahms horn trio"));
        assert!(!is_strong_match("brahms horn something", "brahms horn trio"));
    }

    #[test]
    fn test_is_strong_match_stop_words_ignored() {
        // ストップワードだけが共通しても一致しない
        assert!(!is_strong_match("no op in major", "no op in minor"));
    }

    #[test]
    fn test_match_work_exact_priority() {
        // 完全一致はあいまい照合より優先。登録順で先にあいまい一致する
        // エントリがあっても、完全一致キーの側が返る
        let mut catalog = WorkCatalog::new();
        catalog.insert("mozart symphony", record("Coarse Entry"));
        catalog.insert("mozart symphony 40", record("Symphony No.40, K.550"));

        let result = match_work(&query("Mozart", "Symphony 40"), &catalog);
        assert_eq!(
            result.record.expect("照合されるはず").canonical_title,
            "Symphony No.40, K.550"
        );
    }

    #[test]
    fn test_match_work_fuzzy_first_entry_wins() {
        // 複数エントリが条件を満たす場合は登録順で最初のものを採用
        let mut catalog = WorkCatalog::new();
        catalog.insert("bach gavottes", record("First Entry"));
        catalog.insert("bach gavottes bwv 1068", record("Second Entry"));

        // "bach gavottes dance"はどのキーとも完全一致しない
        let result = match_work(&query("Bach", "Gavottes Dance"), &catalog);
        assert_eq!(result.record.expect("照合されるはず").canonical_title, "First Entry");
    }

    #[test]
    fn test_match_work_deterministic() {
        let catalog = WorkCatalog::builtin();
        let q = query("Mozart", "Symphony No.40 in G minor, mvt. 1");

        let first = match_work(&q, &catalog);
        let second = match_work(&q, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_symphony_movement() {
        // 楽章指定付きの入力が親作品のエントリに照合される
        let catalog = WorkCatalog::builtin();
        let result = match_work(&query("Mozart", "Symphony No.40 in G minor, mvt. 1"), &catalog);

        let record = result.record.expect("照合されるはず");
        assert_eq!(record.canonical_title, "Symphony No.40, K.550");
    }

    #[test]
    fn test_scenario_gavottes_tie_break() {
        // "bach gavottes"と"bach orchestral suite no. 3"の両方が候補に
        // なり得るが、登録順が先のgavottesエントリ（note付き）が返る
        let catalog = WorkCatalog::builtin();
        let result = match_work(&query("Bach", "Gavottes from Orchestral Suite"), &catalog);

        let record = result.record.expect("照合されるはず");
        assert_eq!(record.canonical_title, "Orchestral Suite No.3, BWV 1068");
        assert!(record.note.expect("noteがあるはず").contains("Gavottes"));
    }

    #[test]
    fn test_scenario_generic_title_no_match() {
        // カタログ番号のない汎用的な曲名は誤照合せずNoneを返す
        let catalog = WorkCatalog::builtin();
        let result = match_work(&query("Haydn", "Piano Sonata"), &catalog);
        assert!(result.record.is_none());
    }

    #[test]
    fn test_match_work_no_shared_vocabulary() {
        let catalog = WorkCatalog::builtin();
        let result = match_work(&query("Xenakis", "Metastaseis"), &catalog);
        assert!(result.record.is_none());
        assert_eq!(result.input.composer, "Xenakis");
    }
}
