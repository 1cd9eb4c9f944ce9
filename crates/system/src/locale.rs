//! Ranking faces against BCP-47 locale preferences.
//!
//! fontdb only records the languages of each face's name-table entries, so
//! a face "matches" a locale when one of its family names is recorded in a
//! language whose primary subtag equals the locale's.

use fontdb::{FaceInfo, Language};

/// Primary subtags of the languages a face's family names are recorded in.
pub(crate) fn face_languages(face: &FaceInfo) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::new();
    for tag in face.families.iter().filter_map(|(_, language)| language_subtag(*language)) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Primary subtags of the caller's locales, in preference order.
pub(crate) fn requested_subtags(locales: &[&str]) -> Vec<String> {
    locales.iter().map(|locale| primary_subtag(locale)).collect()
}

/// Position of the first requested subtag that `languages` contains;
/// `requested.len()` if it contains none.
pub(crate) fn locale_rank(languages: &[&'static str], requested: &[String]) -> usize {
    requested
        .iter()
        .position(|tag| languages.contains(&tag.as_str()))
        .unwrap_or(requested.len())
}

fn primary_subtag(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn language_subtag(language: Language) -> Option<&'static str> {
    use Language as L;

    let tag = match language {
        L::Afrikaans_SouthAfrica => "af",
        L::Amharic_Ethiopia => "am",
        L::Arabic_Algeria
        | L::Arabic_Bahrain
        | L::Arabic_Egypt
        | L::Arabic_Iraq
        | L::Arabic_Jordan
        | L::Arabic_Kuwait
        | L::Arabic_Lebanon
        | L::Arabic_Libya
        | L::Arabic_Morocco
        | L::Arabic_Oman
        | L::Arabic_Qatar
        | L::Arabic_SaudiArabia
        | L::Arabic_Syria
        | L::Arabic_Tunisia
        | L::Arabic_UAE
        | L::Arabic_Yemen => "ar",
        L::Armenian_Armenia => "hy",
        L::Bengali_Bangladesh | L::Bengali_India => "bn",
        L::Bulgarian_Bulgaria => "bg",
        L::Catalan_Catalan => "ca",
        L::Chinese_HongKongSAR
        | L::Chinese_MacaoSAR
        | L::Chinese_PeoplesRepublicOfChina
        | L::Chinese_Singapore
        | L::Chinese_Taiwan => "zh",
        L::Croatian_Croatia | L::Croatian_Latin_BosniaAndHerzegovina => "hr",
        L::Czech_CzechRepublic => "cs",
        L::Danish_Denmark => "da",
        L::Dutch_Belgium | L::Dutch_Netherlands => "nl",
        L::English_Australia
        | L::English_Belize
        | L::English_Canada
        | L::English_Caribbean
        | L::English_India
        | L::English_Ireland
        | L::English_Jamaica
        | L::English_Malaysia
        | L::English_NewZealand
        | L::English_RepublicOfThePhilippines
        | L::English_Singapore
        | L::English_SouthAfrica
        | L::English_TrinidadAndTobago
        | L::English_UnitedKingdom
        | L::English_UnitedStates
        | L::English_Zimbabwe => "en",
        L::Estonian_Estonia => "et",
        L::Finnish_Finland => "fi",
        L::French_Belgium
        | L::French_Canada
        | L::French_France
        | L::French_Luxembourg
        | L::French_PrincipalityOfMonaco
        | L::French_Switzerland => "fr",
        L::Georgian_Georgia => "ka",
        L::German_Austria
        | L::German_Germany
        | L::German_Liechtenstein
        | L::German_Luxembourg
        | L::German_Switzerland => "de",
        L::Greek_Greece => "el",
        L::Gujarati_India => "gu",
        L::Hebrew_Israel => "he",
        L::Hindi_India => "hi",
        L::Hungarian_Hungary => "hu",
        L::Icelandic_Iceland => "is",
        L::Indonesian_Indonesia => "id",
        L::Italian_Italy | L::Italian_Switzerland => "it",
        L::Japanese_Japan => "ja",
        L::Kannada_India => "kn",
        L::Kazakh_Kazakhstan => "kk",
        L::Khmer_Cambodia => "km",
        L::Korean_Korea => "ko",
        L::Lao_LaoPDR => "lo",
        L::Latvian_Latvia => "lv",
        L::Lithuanian_Lithuania => "lt",
        L::Macedonian_NorthMacedonia => "mk",
        L::Malay_BruneiDarussalam | L::Malay_Malaysia => "ms",
        L::Malayalam_India => "ml",
        L::Marathi_India => "mr",
        L::Mongolian_Cyrillic_Mongolia | L::Mongolian_Traditional_PeoplesRepublicOfChina => "mn",
        L::Nepali_Nepal => "ne",
        L::Norwegian_Bokmal_Norway => "nb",
        L::Norwegian_Nynorsk_Norway => "nn",
        L::Odia_India => "or",
        L::Polish_Poland => "pl",
        L::Portuguese_Brazil | L::Portuguese_Portugal => "pt",
        L::Punjabi_India => "pa",
        L::Romanian_Romania => "ro",
        L::Russian_Russia => "ru",
        L::Serbian_Cyrillic_BosniaAndHerzegovina
        | L::Serbian_Cyrillic_Serbia
        | L::Serbian_Latin_BosniaAndHerzegovina
        | L::Serbian_Latin_Serbia => "sr",
        L::Sinhala_SriLanka => "si",
        L::Slovak_Slovakia => "sk",
        L::Slovenian_Slovenia => "sl",
        L::Spanish_Argentina
        | L::Spanish_Bolivia
        | L::Spanish_Chile
        | L::Spanish_Colombia
        | L::Spanish_CostaRica
        | L::Spanish_DominicanRepublic
        | L::Spanish_Ecuador
        | L::Spanish_ElSalvador
        | L::Spanish_Guatemala
        | L::Spanish_Honduras
        | L::Spanish_Mexico
        | L::Spanish_Nicaragua
        | L::Spanish_Panama
        | L::Spanish_Paraguay
        | L::Spanish_Peru
        | L::Spanish_PuertoRico
        | L::Spanish_ModernSort_Spain
        | L::Spanish_TraditionalSort_Spain
        | L::Spanish_UnitedStates
        | L::Spanish_Uruguay
        | L::Spanish_Venezuela => "es",
        L::Swedish_Finland | L::Swedish_Sweden => "sv",
        L::Tamil_India => "ta",
        L::Telugu_India => "te",
        L::Thai_Thailand => "th",
        L::Tibetan_PRC => "bo",
        L::Turkish_Turkey => "tr",
        L::Ukrainian_Ukraine => "uk",
        L::Urdu_IslamicRepublicOfPakistan => "ur",
        L::Vietnamese_Vietnam => "vi",
        L::Welsh_UnitedKingdom => "cy",
        _ => return None,
    };
    Some(tag)
}
