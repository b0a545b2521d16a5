//! 作品カタログモジュール
//!
//! 正規化キー → 正規作品エントリの参照テーブル。起動時に一度だけ
//! 構築し、以後は不変として扱う。あいまい照合の走査順を決定的に
//! するため、エントリは登録順を保持する。

use crate::error::{Error, Result};
use crate::matcher::normalize_key;
use crate::types::WorkRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// カタログJSONファイルの1エントリ
///
/// ファイル形式はオブジェクトの配列。配列にしているのは、読み込み順が
/// そのまま照合の走査順になるため。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub key: String,
    pub title: String,
    pub composer: String,
    pub url: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// 作品カタログ
#[derive(Debug, Clone, Default)]
pub struct WorkCatalog {
    /// 登録順のエントリ（キーは正規化済み）
    entries: Vec<(String, WorkRecord)>,
    /// 正規化キー → entriesのインデックス
    index: HashMap<String, usize>,
}

/// 組み込みカタログの定義: (キー, 正規タイトル, 作曲家, URL, 補足)
///
/// 手整備の既知作品テーブル。キーは登録時に正規化されるため、
/// ここでは読みやすい表記のままでよい。
const BUILTIN_WORKS: &[(&str, &str, &str, &str, Option<&str>)] = &[
    (
        "mozart symphony 40",
        "Symphony No.40, K.550",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Symphony_No.40,_K.550_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart symphony 36",
        "Symphony No.36, K.425",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Symphony_No.36,_K.425_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart symphony 35",
        "Symphony No.35, K.385",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Symphony_No.35,_K.385_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart eine kleine nachtmusik",
        "Eine kleine Nachtmusik, K.525",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Eine_kleine_Nachtmusik,_K.525_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "beethoven piano sonata no 8",
        "Piano Sonata No.8, Op.13",
        "Beethoven, Ludwig van",
        "https://imslp.org/wiki/Piano_Sonata_No.8,_Op.13_(Beethoven,_Ludwig_van)",
        None,
    ),
    (
        "beethoven piano sonata no. 21",
        "Piano Sonata No.21, Op.53",
        "Beethoven, Ludwig van",
        "https://imslp.org/wiki/Piano_Sonata_No.21,_Op.53_(Beethoven,_Ludwig_van)",
        None,
    ),
    (
        "beethoven piano sonata no. 15",
        "Piano Sonata No.15, Op.28",
        "Beethoven, Ludwig van",
        "https://imslp.org/wiki/Piano_Sonata_No.15,_Op.28_(Beethoven,_Ludwig_van)",
        None,
    ),
    (
        "beethoven piano sonata no. 20",
        "Piano Sonata No.20, Op.49 No.2",
        "Beethoven, Ludwig van",
        "https://imslp.org/wiki/Piano_Sonata_No.20,_Op.49_No.2_(Beethoven,_Ludwig_van)",
        None,
    ),
    (
        "bach french suite no 6",
        "French Suite No.6, BWV 817",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/French_Suite_No.6,_BWV_817_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "bach cello suite no 3",
        "Cello Suite No.3, BWV 1009",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Cello_Suite_No.3,_BWV_1009_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "bach well-tempered clavier",
        "Well-Tempered Clavier I, BWV 846-869",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Well-Tempered_Clavier_I,_BWV_846-869_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "bach wtc",
        "Well-Tempered Clavier I, BWV 846-869",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Well-Tempered_Clavier_I,_BWV_846-869_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "bach brandenburg concerto no 5",
        "Brandenburg Concerto No.5, BWV 1050",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Brandenburg_Concerto_No.5,_BWV_1050_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "bach brandenburg concerto no 2",
        "Brandenburg Concerto No.2, BWV 1047",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Brandenburg_Concerto_No.2,_BWV_1047_(Bach,_Johann_Sebastian)",
        None,
    ),
    (
        "haydn symphony 103",
        "Symphony No.103, Hob.I:103",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Symphony_No.103,_Hob.I:103_(Haydn,_Joseph)",
        None,
    ),
    (
        "haydn symphony 101",
        "Symphony No.101, Hob.I:101",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Symphony_No.101,_Hob.I:101_(Haydn,_Joseph)",
        None,
    ),
    (
        "vivaldi winter",
        "The Four Seasons, Op.8",
        "Vivaldi, Antonio",
        "https://imslp.org/wiki/The_Four_Seasons,_Op.8_(Vivaldi,_Antonio)",
        None,
    ),
    (
        "vivaldi summer",
        "The Four Seasons, Op.8",
        "Vivaldi, Antonio",
        "https://imslp.org/wiki/The_Four_Seasons,_Op.8_(Vivaldi,_Antonio)",
        None,
    ),
    (
        "schumann novelletten",
        "8 Novelletten, Op.21",
        "Schumann, Robert",
        "https://imslp.org/wiki/8_Novelletten,_Op.21_(Schumann,_Robert)",
        None,
    ),
    (
        "schubert kennst du das land",
        "Mignon Songs, D.321",
        "Schubert, Franz",
        "https://imslp.org/wiki/Mignon_Songs,_D.321_(Schubert,_Franz)",
        Some("\"Kennst du das Land\" is part of the Mignon Songs"),
    ),
    (
        "schubert der doppelganger",
        "Schwanengesang, D.957",
        "Schubert, Franz",
        "https://imslp.org/wiki/Schwanengesang,_D.957_(Schubert,_Franz)",
        Some("\"Der Doppelgänger\" is No.13 in the Schwanengesang song cycle"),
    ),
    (
        "purcell when i am laid in earth",
        "Dido and Aeneas, Z.626",
        "Purcell, Henry",
        "https://imslp.org/wiki/Dido_and_Aeneas,_Z.626_(Purcell,_Henry)",
        Some("\"When I am laid in earth\" is Dido's Lament from the opera"),
    ),
    (
        "fanny mendelssohn trio",
        "Piano Trio, Op.11",
        "Hensel, Fanny",
        "https://imslp.org/wiki/Piano_Trio,_Op.11_(Hensel,_Fanny)",
        Some("Fanny Mendelssohn-Hensel is catalogued under \"Hensel, Fanny\" on IMSLP"),
    ),
    (
        "hensel trio",
        "Piano Trio, Op.11",
        "Hensel, Fanny",
        "https://imslp.org/wiki/Piano_Trio,_Op.11_(Hensel,_Fanny)",
        Some("Alternative name for Fanny Mendelssohn"),
    ),
    (
        "anna magdalena bach march",
        "Notebook for Anna Magdalena Bach, BWV Anh.113-132",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Notebook_for_Anna_Magdalena_Bach,_BWV_Anh.113-132_(Bach,_Johann_Sebastian)",
        Some("March in D major, BWV Anh.122 is from Anna Magdalena Bach's Notebook"),
    ),
    (
        "bach anna magdalena",
        "Notebook for Anna Magdalena Bach, BWV Anh.113-132",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Notebook_for_Anna_Magdalena_Bach,_BWV_Anh.113-132_(Bach,_Johann_Sebastian)",
        Some("Collection includes various pieces attributed to Bach and others"),
    ),
    (
        "mozart piano concerto k 107",
        "Piano Concerto No.1, K.37",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Piano_Concerto_No.1,_K.37_(Mozart,_Wolfgang_Amadeus)",
        Some("K.107 refers to early concertos, K.37 is the first numbered piano concerto"),
    ),
    (
        "mozart piano concerto k 271",
        "Piano Concerto No.9, K.271",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Piano_Concerto_No.9,_K.271_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart clarinet concerto",
        "Clarinet Concerto, K.622",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Clarinet_Concerto,_K.622_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart piano concerto k 246",
        "Piano Concerto No.8, K.246",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Piano_Concerto_No.8,_K.246_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "mozart piano sonata k. 333",
        "Piano Sonata No.13, K.333/315c",
        "Mozart, Wolfgang Amadeus",
        "https://imslp.org/wiki/Piano_Sonata_No.13,_K.333/315c_(Mozart,_Wolfgang_Amadeus)",
        None,
    ),
    (
        "brahms clarinet sonata",
        "Clarinet Sonata No.1, Op.120 No.1",
        "Brahms, Johannes",
        "https://imslp.org/wiki/Clarinet_Sonata_No.1,_Op.120_No.1_(Brahms,_Johannes)",
        None,
    ),
    (
        "haydn piano sonata hob. xvi 37",
        "Piano Sonata No.37, Hob.XVI:37",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Piano_Sonata_No.37,_Hob.XVI:37_(Haydn,_Joseph)",
        None,
    ),
    (
        "haydn piano sonata hob xvi:3",
        "Piano Sonata No.3, Hob.XVI:3",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Piano_Sonata_No.3,_Hob.XVI:3_(Haydn,_Joseph)",
        None,
    ),
    (
        "haydn piano sonata hob. xvi/20",
        "Piano Sonata No.33, Hob.XVI:20",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Piano_Sonata_No.33,_Hob.XVI:20_(Haydn,_Joseph)",
        None,
    ),
    (
        "haydn piano sonata hob.xvi:38",
        "Piano Sonata No.38, Hob.XVI:38",
        "Haydn, Joseph",
        "https://imslp.org/wiki/Piano_Sonata_No.38,_Hob.XVI:38_(Haydn,_Joseph)",
        None,
    ),
    (
        "haydn op. 76, no. 3",
        "String Quartet Op.76 No.3, Hob.III:77",
        "Haydn, Joseph",
        "https://imslp.org/wiki/String_Quartet_Op.76_No.3,_Hob.III:77_(Haydn,_Joseph)",
        Some("The famous \"Emperor\" quartet"),
    ),
    (
        "bach gavottes",
        "Orchestral Suite No.3, BWV 1068",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Orchestral_Suite_No.3,_BWV_1068_(Bach,_Johann_Sebastian)",
        Some("Contains the famous Gavottes"),
    ),
    (
        "bach orchestral suite no. 3",
        "Orchestral Suite No.3, BWV 1068",
        "Bach, Johann Sebastian",
        "https://imslp.org/wiki/Orchestral_Suite_No.3,_BWV_1068_(Bach,_Johann_Sebastian)",
        None,
    ),
];

impl WorkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みカタログを構築
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, title, composer, url, note) in BUILTIN_WORKS {
            catalog.insert(
                key,
                WorkRecord {
                    canonical_title: (*title).to_string(),
                    composer: (*composer).to_string(),
                    url: (*url).to_string(),
                    note: note.map(str::to_string),
                },
            );
        }
        catalog
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        for entry in entries {
            if normalize_key(&entry.key).is_empty() {
                return Err(Error::Catalog(format!(
                    "正規化後に空になるキーは登録できません: {:?}",
                    entry.key
                )));
            }
            catalog.insert(
                &entry.key,
                WorkRecord {
                    canonical_title: entry.title,
                    composer: entry.composer,
                    url: entry.url,
                    note: entry.note,
                },
            );
        }

        Ok(catalog)
    }

    /// エントリを登録する
    ///
    /// キーは正規化して格納する。既存キーの場合はレコードを上書きし、
    /// 登録位置は最初のまま保つ。
    pub fn insert(&mut self, key: &str, record: WorkRecord) {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }

        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = record,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }

    /// キーの完全一致で検索する（キーは検索前に正規化される）
    pub fn get(&self, key: &str) -> Option<&WorkRecord> {
        self.index.get(&normalize_key(key)).map(|&i| &self.entries[i].1)
    }

    /// 登録順に(キー, レコード)を返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 別のカタログをマージする（後勝ち、位置は既存側を保持）
    pub fn merge(&mut self, other: &WorkCatalog) {
        for (key, record) in other.iter() {
            self.insert(key, record.clone());
        }
    }
}
