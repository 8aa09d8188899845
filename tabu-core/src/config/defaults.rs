//! Built-in production values

use super::*;

const CATEGORY_TABLE: &[(&str, &[&str], &[&str])] = &[
    (
        "Diziler & Filmler",
        &["film", "dizi", "oyuncu", "yönetmen", "sahne", "karakter", "sezon", "fragman", "set", "kurgu"],
        &[
            "?item wdt:P31 wd:Q11424 .",
            "?item wdt:P31 wd:Q5398426 .",
            "?item wdt:P31 wd:Q24856 .",
        ],
    ),
    (
        "Astronomi, Fizik & Mühendislik",
        &["uzay", "yıldız", "gezegen", "fizik", "mühendislik", "enerji", "kuvvet", "deney", "denklem", "teori"],
        &[
            "?item wdt:P31 wd:Q6999 .",
            "?item wdt:P31 wd:Q173227 .",
            "?item wdt:P31 wd:Q107715 .",
            "?item wdt:P31 wd:Q811979 .",
            "?item wdt:P31 wd:Q47574 .",
            "?item wdt:P106 wd:Q169470 .",
            "?item wdt:P106 wd:Q11063 .",
            "?item wdt:P106 wd:Q81096 .",
        ],
    ),
    (
        "Spor",
        &["spor", "maç", "takım", "skor", "turnuva", "antrenman", "taktik", "saha", "oyuncu", "şampiyon"],
        &[
            "?item wdt:P31 wd:Q349 .",
            "?item wdt:P31 wd:Q12973014 .",
            "?item wdt:P31 wd:Q16510064 .",
            "?item wdt:P31 wd:Q483110 .",
            "?item wdt:P106 wd:Q2066131 .",
        ],
    ),
    (
        "Tarih",
        &["tarih", "savaş", "antlaşma", "imparatorluk", "devrim", "hanedan", "kronoloji", "medeniyet", "dönem", "belge"],
        &[
            "?item wdt:P31 wd:Q13418847 .",
            "?item wdt:P31 wd:Q198 .",
            "?item wdt:P31 wd:Q131569 .",
            "?item wdt:P31 wd:Q188 .",
            "?item wdt:P31 wd:Q11514315 .",
        ],
    ),
    (
        "Coğrafya",
        &["coğrafya", "kıta", "ülke", "şehir", "dağ", "nehir", "ada", "okyanus", "iklim", "bölge"],
        &[
            "?item wdt:P31 wd:Q6256 .",
            "?item wdt:P31 wd:Q515 .",
            "?item wdt:P31 wd:Q8502 .",
            "?item wdt:P31 wd:Q4022 .",
            "?item wdt:P31 wd:Q23442 .",
            "?item wdt:P31 wd:Q165 .",
        ],
    ),
    (
        "Müzik",
        &["müzik", "melodi", "ritim", "nota", "enstrüman", "konser", "albüm", "şarkı", "sanatçı", "beste"],
        &[
            "?item wdt:P31 wd:Q7366 .",
            "?item wdt:P31 wd:Q482994 .",
            "?item wdt:P31 wd:Q215380 .",
            "?item wdt:P31 wd:Q34379 .",
            "?item wdt:P106 wd:Q177220 .",
            "?item wdt:P106 wd:Q36834 .",
        ],
    ),
    (
        "Teknoloji",
        &["teknoloji", "yazılım", "donanım", "sistem", "ağ", "veri", "güvenlik", "uygulama", "platform", "algoritma"],
        &[
            "?item wdt:P31 wd:Q7397 .",
            "?item wdt:P31 wd:Q9143 .",
            "?item wdt:P31 wd:Q9135 .",
            "?item wdt:P31 wd:Q3966 .",
            "{ ?item wdt:P31 wd:Q783794 . ?item wdt:P452 wd:Q11661 . }",
            "?item wdt:P31 wd:Q7889 .",
        ],
    ),
    (
        "Yemek",
        &["yemek", "tarif", "mutfak", "malzeme", "lezzet", "sos", "baharat", "pişirme", "tatlı", "içecek"],
        &[
            "?item wdt:P31 wd:Q2095 .",
            "?item wdt:P31 wd:Q746549 .",
            "?item wdt:P31 wd:Q40050 .",
            "?item wdt:P31 wd:Q42527 .",
            "?item wdt:P31 wd:Q3314483 .",
        ],
    ),
    (
        "Doğa",
        &["doğa", "orman", "nehir", "ekosistem", "habitat", "canlı", "bitki", "hayvan", "iklim", "biyoçeşitlilik"],
        &[
            "?item wdt:P31 wd:Q729 .",
            "?item wdt:P31 wd:Q756 .",
            "?item wdt:P31 wd:Q1322005 .",
            "?item wdt:P31 wd:Q193668 .",
            "?item wdt:P31 wd:Q46169 .",
        ],
    ),
    (
        "Sanat",
        &["sanat", "eser", "galeri", "sergi", "müze", "kompozisyon", "heykel", "resim", "estetik", "akım"],
        &[
            "?item wdt:P31 wd:Q838948 .",
            "?item wdt:P31 wd:Q3305213 .",
            "?item wdt:P31 wd:Q860861 .",
            "?item wdt:P31 wd:Q968159 .",
            "?item wdt:P31 wd:Q33506 .",
            "?item wdt:P106 wd:Q483501 .",
        ],
    ),
];

const GENERIC_BANNED: &[&str] = &["temel", "gelişmiş", "profesyonel", "yeni nesil"];

const SENSITIVE: &[&str] = &[
    "sexual", "sex", "abuse", "massacre", "murder", "rape", "porn", "porno", "pornographic",
    "nude", "whore", "erotic", "suicide", "terror", "genocide", "shit", "fuck",
];

// Turkish and English function words
const STOPWORDS: &[&str] = &[
    "ve", "ile", "ya", "da", "de", "bir", "bu", "şu", "o", "için", "gibi", "kadar", "en", "çok",
    "az", "daha", "ilgili", "hakkında", "üzerine", "the", "of", "and", "in", "on", "at", "to",
    "by", "from", "an", "a", "for", "that", "this", "with", "without", "between", "into", "over",
    "under", "it", "its", "is", "are", "was", "were",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn default_categories() -> Vec<CategorySpec> {
    CATEGORY_TABLE
        .iter()
        .map(|(name, terms, clauses)| CategorySpec {
            name: name.to_string(),
            terms: owned(terms),
            query_clauses: owned(clauses),
        })
        .collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            filter: FilterConfig::default(),
            stopwords: owned(STOPWORDS),
            generation: GenerationConfig::default(),
            curation: CurationConfig::default(),
            validation: ValidationConfig::default(),
            difficulty: DifficultyConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            generic_banned: owned(GENERIC_BANNED),
            sensitive: owned(SENSITIVE),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target_count: 500,
            min_word_length: 2,
            max_word_length: 48,
            max_significant_tokens: 6,
            label_token_seeds: 3,
            description_token_seeds: 8,
        }
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_per_category: 500,
            max_word_length: 64,
            max_letter_tokens: 9,
            label_token_seeds: 3,
        }
    }
}

impl Default for RatioBands {
    fn default() -> Self {
        Self {
            easy: RatioBand::new(0.25, 0.45),
            medium: RatioBand::new(0.35, 0.55),
            hard: RatioBand::new(0.10, 0.30),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_count: 450,
            max_count: 500,
            max_word_length: 64,
            max_letter_tokens: 9,
            ratio_bands: RatioBands::default(),
            display_limit: 120,
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy_ratio: 0.35,
            medium_ratio: 0.45,
            easy_below: 22,
            medium_below: 34,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            backoff_base_ms: 1000,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://query.wikidata.org/sparql".to_string(),
            user_agent: concat!("TabuCatalogBuilder/", env!("CARGO_PKG_VERSION")).to_string(),
            languages: "tr,en".to_string(),
            batch_size: 700,
            max_offset: 28_000,
            row_multiplier: 8,
            batch_delay_ms: 250,
            timeout_secs: 60,
            retry: RetryConfig::default(),
        }
    }
}
