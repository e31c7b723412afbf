//! Fixed tables used to seed an empty vocabulary.
//!
//! Genres are written first with weight 2, then themes with weight 1. Since
//! seeding is an upsert, a word listed under both (e.g. "guerre", "combat")
//! keeps its theme classification.

pub const GENRE_SEED_WEIGHT: u32 = 2;
pub const THEME_SEED_WEIGHT: u32 = 1;

pub const GENRE_SEED: &[(&str, &[&str])] = &[
    ("action", &["action", "combat", "explosion", "aventure"]),
    ("comédie", &["comédie", "humour", "drôle", "rire"]),
    ("drame", &["drame", "dramatique", "émouvant"]),
    (
        "science-fiction",
        &["science-fiction", "sci-fi", "futur", "espace"],
    ),
    ("horreur", &["horreur", "épouvante", "peur", "effrayant"]),
    ("thriller", &["thriller", "suspense", "mystère"]),
    ("romance", &["romance", "amour", "romantique"]),
    ("animation", &["animation", "animé", "dessin animé"]),
    ("documentaire", &["documentaire", "docu"]),
    ("famille", &["famille", "familial", "enfant", "jeunesse"]),
    (
        "guerre",
        &["guerre", "militaire", "bataille", "soldat", "armée", "combat"],
    ),
];

pub const THEME_SEED: &[(&str, &[&str])] = &[
    (
        "voiture",
        &[
            "voiture",
            "course",
            "automobile",
            "racing",
            "fast",
            "furious",
            "vitesse",
            "pilote",
        ],
    ),
    (
        "super-héros",
        &[
            "super-héros",
            "superhéros",
            "marvel",
            "dc",
            "comics",
            "superman",
            "batman",
            "avengers",
        ],
    ),
    (
        "sport",
        &[
            "sport",
            "football",
            "basketball",
            "tennis",
            "boxe",
            "athlète",
            "champion",
        ],
    ),
    (
        "guerre",
        &["guerre", "militaire", "bataille", "soldat", "armée", "combat"],
    ),
    (
        "fantasy",
        &["fantasy", "magie", "dragon", "sorcier", "magique", "médiéval"],
    ),
    ("western", &["western", "cowboy", "far west", "ranch", "shérif"]),
    (
        "espionnage",
        &["espion", "agent secret", "cia", "mission", "infiltration"],
    ),
    (
        "catastrophe",
        &[
            "catastrophe",
            "désastre",
            "apocalypse",
            "tsunami",
            "tremblement",
            "météorite",
        ],
    ),
    (
        "musical",
        &[
            "musical",
            "musique",
            "danse",
            "chant",
            "concert",
            "comédie musicale",
        ],
    ),
    (
        "historique",
        &["historique", "histoire", "période", "époque", "biographie"],
    ),
];

pub const STOP_WORDS_SEED: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "ce", "ces", "sa", "ses", "son", "mes", "mon", "ma",
    "et", "ou", "mais", "donc", "car", "ni", "or", "que", "qui", "quoi", "dont", "où", "dans",
    "sur", "sous", "par", "pour", "en", "vers", "avec", "sans", "de", "à", "je", "tu", "il",
    "elle", "nous", "vous", "ils", "elles", "on", "être", "avoir", "faire", "dire", "aller",
    "voir", "vouloir", "pouvoir", "falloir", "plus", "moins", "très", "bien", "mal", "tout",
    "tous", "toute", "toutes", "autre", "autres", "même", "aussi", "alors", "après", "avant",
    "oui", "non", "peut", "comme", "entre", "chaque", "puis", "est", "sont", "sera", "été",
    "était", "étaient", "soit", "suis", "sommes", "film", "films", "histoire", "année", "années",
    "fois", "fait", "cette", "cet", "celui", "celle", "ceux", "celles",
];
