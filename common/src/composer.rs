//! 作曲家名の正規化
//!
//! 人手入力の作曲家名をカタログの「姓, 名」表記に揃える。
//! 照合キーには使わず、レポート表示と検索リンク生成で使う。

/// 既知の表記ゆれ → 正規表記
const COMPOSER_ALIASES: &[(&str, &str)] = &[
    ("Bach", "Bach, Johann Sebastian"),
    ("Mozart", "Mozart, Wolfgang Amadeus"),
    ("Beethoven", "Beethoven, Ludwig van"),
    ("Haydn", "Haydn, Joseph"),
    ("Schubert", "Schubert, Franz"),
    ("Brahms", "Brahms, Johannes"),
    ("Schumann", "Schumann, Robert"),
    // 作品集の通称はバッハ本人の項に置かれている
    ("Anna Magdalena Bach", "Bach, Johann Sebastian"),
    // IMSLPでは婚姻後の姓で登録されている
    ("Fanny Mendelssohn", "Hensel, Fanny"),
];

/// 作曲家名を「姓, 名」表記に正規化する
///
/// 既知の別名はテーブルで変換し、すでに「姓, 名」形式ならそのまま、
/// 「名 姓」形式なら並べ替える。1語だけの場合は変換しない。
pub fn normalize_composer_name(composer: &str) -> String {
    let composer = composer.trim();

    for (alias, canonical) in COMPOSER_ALIASES {
        if *alias == composer {
            return (*canonical).to_string();
        }
    }

    if composer.contains(',') {
        return composer.to_string();
    }

    let parts: Vec<&str> = composer.split_whitespace().collect();
    if parts.len() >= 2 {
        format!("{}, {}", parts[parts.len() - 1], parts[..parts.len() - 1].join(" "))
    } else {
        composer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases() {
        assert_eq!(normalize_composer_name("Bach"), "Bach, Johann Sebastian");
        assert_eq!(normalize_composer_name("Fanny Mendelssohn"), "Hensel, Fanny");
        assert_eq!(normalize_composer_name("  Mozart  "), "Mozart, Wolfgang Amadeus");
    }

    #[test]
    fn test_last_first_passthrough() {
        assert_eq!(normalize_composer_name("Hensel, Fanny"), "Hensel, Fanny");
        assert_eq!(
            normalize_composer_name("Saint-Saëns, Camille"),
            "Saint-Saëns, Camille"
        );
    }

    #[test]
    fn test_first_last_inverted() {
        assert_eq!(normalize_composer_name("Antonio Vivaldi"), "Vivaldi, Antonio");
        assert_eq!(
            normalize_composer_name("Ludwig van Beethoven"),
            "Beethoven, Ludwig van"
        );
    }

    #[test]
    fn test_single_word_unknown() {
        assert_eq!(normalize_composer_name("Xenakis"), "Xenakis");
    }
}
