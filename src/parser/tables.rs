//! Static lookup tables for reservation parsing
//!
//! Month names, field labels, spelled-out numbers and Greeklish cue words,
//! kept out of the matching code so every entry can be tested on its own.
//! All keys are lowercase and accent-free; callers fold their tokens with
//! [`crate::parser::utils::fold`] before looking them up.

use crate::parser::fields::Field;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// English month names and abbreviations
pub static ENGLISH_MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("sept", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Greek month names: nominative, genitive, accusative and colloquial forms
pub static GREEK_MONTHS: &[(&str, u32)] = &[
    ("ιανουαριος", 1),
    ("ιανουαριου", 1),
    ("ιανουαριο", 1),
    ("γεναρης", 1),
    ("γεναρη", 1),
    ("φεβρουαριος", 2),
    ("φεβρουαριου", 2),
    ("φεβρουαριο", 2),
    ("φλεβαρης", 2),
    ("φλεβαρη", 2),
    ("μαρτιος", 3),
    ("μαρτιου", 3),
    ("μαρτιο", 3),
    ("μαρτης", 3),
    ("μαρτη", 3),
    ("απριλιος", 4),
    ("απριλιου", 4),
    ("απριλιο", 4),
    ("απριλης", 4),
    ("απριλη", 4),
    ("μαιος", 5),
    ("μαιου", 5),
    ("μαιο", 5),
    ("μαης", 5),
    ("μαη", 5),
    ("ιουνιος", 6),
    ("ιουνιου", 6),
    ("ιουνιο", 6),
    ("ιουνης", 6),
    ("ιουνη", 6),
    ("ιουλιος", 7),
    ("ιουλιου", 7),
    ("ιουλιο", 7),
    ("ιουλης", 7),
    ("ιουλη", 7),
    ("αυγουστος", 8),
    ("αυγουστου", 8),
    ("αυγουστο", 8),
    ("σεπτεμβριος", 9),
    ("σεπτεμβριου", 9),
    ("σεπτεμβριο", 9),
    ("σεπτεμβρης", 9),
    ("σεπτεμβρη", 9),
    ("οκτωβριος", 10),
    ("οκτωβριου", 10),
    ("οκτωβριο", 10),
    ("οκτωβρης", 10),
    ("οκτωβρη", 10),
    ("νοεμβριος", 11),
    ("νοεμβριου", 11),
    ("νοεμβριο", 11),
    ("νοεμβρης", 11),
    ("νοεμβρη", 11),
    ("δεκεμβριος", 12),
    ("δεκεμβριου", 12),
    ("δεκεμβριο", 12),
    ("δεκεμβρης", 12),
    ("δεκεμβρη", 12),
];

/// Greeklish month spellings mapped to their Greek spelling.
///
/// A token matches a spelling exactly or as an unambiguous abbreviation of
/// it ("noem", "dek"), so English words that merely share three letters
/// ("junior", "separate", "decent") are not months.
pub static GREEKLISH_MONTHS: &[(&str, &str)] = &[
    ("ianouariou", "ιανουαριος"),
    ("ianouarios", "ιανουαριος"),
    ("ianouario", "ιανουαριος"),
    ("ianuariou", "ιανουαριος"),
    ("genari", "γεναρης"),
    ("genaris", "γεναρης"),
    ("gennari", "γεναρης"),
    ("gennaris", "γεναρης"),
    ("yenari", "γεναρης"),
    ("fevrouariou", "φεβρουαριος"),
    ("fevrouarios", "φεβρουαριος"),
    ("fevrouario", "φεβρουαριος"),
    ("febrouariou", "φεβρουαριος"),
    ("flevari", "φλεβαρης"),
    ("flevaris", "φλεβαρης"),
    ("martiou", "μαρτιος"),
    ("martios", "μαρτιος"),
    ("martio", "μαρτιος"),
    ("marti", "μαρτιος"),
    ("apriliou", "απριλιος"),
    ("aprilios", "απριλιος"),
    ("aprilio", "απριλιος"),
    ("aprili", "απριλιος"),
    ("maiou", "μαιος"),
    ("maios", "μαιος"),
    ("maio", "μαιος"),
    ("magiou", "μαιος"),
    ("iouniou", "ιουνιος"),
    ("iounios", "ιουνιος"),
    ("iounio", "ιουνιος"),
    ("iouni", "ιουνιος"),
    ("iuniou", "ιουνιος"),
    ("juniou", "ιουνιος"),
    ("junios", "ιουνιος"),
    ("louniou", "ιουνιος"),
    ("iouliou", "ιουλιος"),
    ("ioulios", "ιουλιος"),
    ("ioulio", "ιουλιος"),
    ("iouli", "ιουλιος"),
    ("iuliou", "ιουλιος"),
    ("juliou", "ιουλιος"),
    ("julios", "ιουλιος"),
    ("louliou", "ιουλιος"),
    ("avgoustou", "αυγουστος"),
    ("avgoustos", "αυγουστος"),
    ("avgousto", "αυγουστος"),
    ("augoustou", "αυγουστος"),
    ("avghoustou", "αυγουστος"),
    ("septemvriou", "σεπτεμβριος"),
    ("septemvrios", "σεπτεμβριος"),
    ("septemvrio", "σεπτεμβριος"),
    ("septembriou", "σεπτεμβριος"),
    ("oktovriou", "οκτωβριος"),
    ("oktovrios", "οκτωβριος"),
    ("oktovrio", "οκτωβριος"),
    ("oktobriou", "οκτωβριος"),
    ("octovriou", "οκτωβριος"),
    ("noemvriou", "νοεμβριος"),
    ("noemvrios", "νοεμβριος"),
    ("noemvrio", "νοεμβριος"),
    ("noembriou", "νοεμβριος"),
    ("novemvriou", "νοεμβριος"),
    ("dekemvriou", "δεκεμβριος"),
    ("dekemvrios", "δεκεμβριος"),
    ("dekemvrio", "δεκεμβριος"),
    ("dekembriou", "δεκεμβριος"),
    ("decemvriou", "δεκεμβριος"),
    ("thekemvriou", "δεκεμβριος"),
];

/// One field label synonym
#[derive(Debug, Clone, Copy)]
pub struct Label {
    pub text: &'static str,
    pub field: Field,
    /// Strong labels may be followed by plain whitespace; weak ones need `:` or `=`
    pub strong: bool,
}

const fn strong(text: &'static str, field: Field) -> Label {
    Label { text, field, strong: true }
}

const fn weak(text: &'static str, field: Field) -> Label {
    Label { text, field, strong: false }
}

/// Field label synonyms in English, Greek and Greeklish
pub static FIELD_LABELS: &[Label] = &[
    // Arrival
    strong("check-in", Field::CheckIn),
    strong("check in", Field::CheckIn),
    strong("checkin", Field::CheckIn),
    strong("arrival date", Field::CheckIn),
    strong("date of arrival", Field::CheckIn),
    strong("arrival", Field::CheckIn),
    strong("arriving", Field::CheckIn),
    weak("start date", Field::CheckIn),
    weak("from date", Field::CheckIn),
    weak("date from", Field::CheckIn),
    strong("ημερομηνια αφιξης", Field::CheckIn),
    strong("ημ. αφιξης", Field::CheckIn),
    strong("ημ/νια αφιξης", Field::CheckIn),
    strong("ημερομηνια εισοδου", Field::CheckIn),
    strong("αφιξη", Field::CheckIn),
    strong("αφιξης", Field::CheckIn),
    weak("εισοδος", Field::CheckIn),
    strong("imerominia afiksis", Field::CheckIn),
    strong("afiksi", Field::CheckIn),
    strong("afixi", Field::CheckIn),
    strong("afiksh", Field::CheckIn),
    // Departure
    strong("check-out", Field::CheckOut),
    strong("check out", Field::CheckOut),
    strong("checkout", Field::CheckOut),
    strong("departure date", Field::CheckOut),
    strong("date of departure", Field::CheckOut),
    strong("departure", Field::CheckOut),
    strong("departing", Field::CheckOut),
    weak("end date", Field::CheckOut),
    weak("to date", Field::CheckOut),
    weak("date to", Field::CheckOut),
    strong("ημερομηνια αναχωρησης", Field::CheckOut),
    strong("ημ. αναχωρησης", Field::CheckOut),
    strong("ημ/νια αναχωρησης", Field::CheckOut),
    strong("ημερομηνια εξοδου", Field::CheckOut),
    strong("αναχωρηση", Field::CheckOut),
    strong("αναχωρησης", Field::CheckOut),
    weak("εξοδος", Field::CheckOut),
    strong("imerominia anaxorisis", Field::CheckOut),
    strong("anaxorisi", Field::CheckOut),
    strong("anaxwrhsh", Field::CheckOut),
    strong("anaxwrisi", Field::CheckOut),
    // Nights
    weak("number of nights", Field::Nights),
    weak("no. of nights", Field::Nights),
    weak("nights", Field::Nights),
    weak("length of stay", Field::Nights),
    weak("αριθμος διανυκτερευσεων", Field::Nights),
    weak("διανυκτερευσεις", Field::Nights),
    weak("νυχτες", Field::Nights),
    weak("βραδια", Field::Nights),
    weak("nyxtes", Field::Nights),
    weak("nuxtes", Field::Nights),
    weak("vradia", Field::Nights),
    // Adults
    weak("number of adults", Field::Adults),
    weak("no. of adults", Field::Adults),
    weak("adults", Field::Adults),
    weak("number of guests", Field::Adults),
    weak("guests", Field::Adults),
    weak("number of persons", Field::Adults),
    weak("persons", Field::Adults),
    weak("people", Field::Adults),
    weak("pax", Field::Adults),
    weak("αριθμος ενηλικων", Field::Adults),
    weak("ενηλικες", Field::Adults),
    weak("αριθμος ατομων", Field::Adults),
    weak("ατομα", Field::Adults),
    weak("enilikes", Field::Adults),
    weak("enhlikes", Field::Adults),
    weak("atoma", Field::Adults),
    // Children
    weak("number of children", Field::Children),
    weak("no. of children", Field::Children),
    weak("children", Field::Children),
    weak("kids", Field::Children),
    weak("αριθμος παιδιων", Field::Children),
    weak("παιδια", Field::Children),
    weak("ανηλικοι", Field::Children),
    weak("paidia", Field::Children),
    // Room type
    weak("room type", Field::RoomType),
    weak("type of room", Field::RoomType),
    weak("room", Field::RoomType),
    weak("accommodation type", Field::RoomType),
    weak("accommodation", Field::RoomType),
    weak("apartment type", Field::RoomType),
    weak("τυπος δωματιου", Field::RoomType),
    weak("δωματιο", Field::RoomType),
    weak("τυπος καταλυματος", Field::RoomType),
    weak("καταλυμα", Field::RoomType),
    weak("typos domatiou", Field::RoomType),
    weak("domatio", Field::RoomType),
    weak("dwmatio", Field::RoomType),
];

/// Spelled-out numbers accepted for counts
pub static NUMBER_WORDS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let groups: &[(&[&str], u32)] = &[
        (&["one", "single", "ενα", "μια", "ενας", "ena", "mia", "enas"], 1),
        (&["two", "couple", "δυο", "dyo", "dio", "duo"], 2),
        (&["three", "τρια", "τρεις", "tria", "treis", "tris"], 3),
        (&["four", "τεσσερα", "τεσσερις", "tessera", "tesseris"], 4),
        (&["five", "πεντε", "pente"], 5),
        (&["six", "εξι", "eksi", "exi"], 6),
        (&["seven", "επτα", "εφτα", "epta", "efta"], 7),
        (&["eight", "οκτω", "οχτω", "okto", "oxto", "ochto"], 8),
        (&["nine", "εννεα", "εννια", "ennea", "ennia"], 9),
        (&["ten", "δεκα", "deka"], 10),
    ];
    for (words, value) in groups {
        for word in *words {
            map.insert(*word, *value);
        }
    }
    map
});

/// Latin-script words that signal Greek written in Greeklish, with a weight.
///
/// Weight 2 words are unambiguous on their own; weight 1 words also occur in
/// English or are too short to trust alone.
pub static GREEKLISH_CUES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for word in [
        "mexri", "mexris", "eos", "ews", "gia", "thelo", "thelw", "theloume", "thelame",
        "dwmatio", "domatio", "dwmatia", "domatia", "diamerisma", "diamerismata", "atoma",
        "atomo", "paidia", "paidi", "nyxtes", "nuxtes", "nixtes", "nyxta", "vradia", "vradies",
        "enilikes", "enhlikes", "kalimera", "kalhmera", "kalispera", "kalhspera", "efxaristo",
        "euxaristw", "eyxaristw", "efharisto", "parakalo", "parakalw", "diathesimotita",
        "diathesimothta", "kratisi", "krathsh", "kratiseis", "thesi", "exete", "exeis",
    ] {
        map.insert(word, 2);
    }
    for word in ["me", "na", "kai", "ena", "mia", "apo", "sas", "tha", "stis", "sto", "ston", "einai"] {
        map.insert(word, 1);
    }
    map
});

/// Leading articles and quantifiers dropped from natural-phrase room types
pub static ROOM_TYPE_ARTICLES: &[&str] = &[
    "ενα", "μια", "ενας", "ενος", "το", "τα", "ena", "mia", "enas", "to", "ta",
];
