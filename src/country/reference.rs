//! Static ISO 3166-1 reference table and the structured lookup stage.
//!
//! Lookup order: alpha-2 → alpha-3 → numeric → name/official/alias exact
//! → near-exact name (edit distance 1, unique hit only).

use std::collections::HashMap;
use std::sync::LazyLock;

/// One ISO 3166-1 entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub numeric: &'static str,
    /// Canonical English short name.
    pub name: &'static str,
    pub official: Option<&'static str>,
    /// Common names and abbreviations people actually type.
    pub aliases: &'static [&'static str],
}

const fn c(
    alpha2: &'static str,
    alpha3: &'static str,
    numeric: &'static str,
    name: &'static str,
    official: Option<&'static str>,
    aliases: &'static [&'static str],
) -> Country {
    Country { alpha2, alpha3, numeric, name, official, aliases }
}

/// Names shorter than this never take part in the near-exact pass.
const NEAR_MATCH_MIN_LEN: usize = 6;

// ─── Reference data ─────────────────────────────────────────────

static COUNTRIES: &[Country] = &[
    c("AD", "AND", "020", "Andorra", Some("Principality of Andorra"), &[]),
    c("AE", "ARE", "784", "United Arab Emirates", None, &["UAE", "Emirates"]),
    c("AF", "AFG", "004", "Afghanistan", Some("Islamic Republic of Afghanistan"), &[]),
    c("AG", "ATG", "028", "Antigua and Barbuda", None, &[]),
    c("AI", "AIA", "660", "Anguilla", None, &[]),
    c("AL", "ALB", "008", "Albania", Some("Republic of Albania"), &[]),
    c("AM", "ARM", "051", "Armenia", Some("Republic of Armenia"), &[]),
    c("AO", "AGO", "024", "Angola", Some("Republic of Angola"), &[]),
    c("AQ", "ATA", "010", "Antarctica", None, &[]),
    c("AR", "ARG", "032", "Argentina", Some("Argentine Republic"), &[]),
    c("AS", "ASM", "016", "American Samoa", None, &[]),
    c("AT", "AUT", "040", "Austria", Some("Republic of Austria"), &["Österreich"]),
    c("AU", "AUS", "036", "Australia", None, &[]),
    c("AW", "ABW", "533", "Aruba", None, &[]),
    c("AX", "ALA", "248", "Åland Islands", None, &["Aland Islands"]),
    c("AZ", "AZE", "031", "Azerbaijan", Some("Republic of Azerbaijan"), &[]),
    c("BA", "BIH", "070", "Bosnia and Herzegovina", Some("Republic of Bosnia and Herzegovina"), &["Bosnia"]),
    c("BB", "BRB", "052", "Barbados", None, &[]),
    c("BD", "BGD", "050", "Bangladesh", Some("People's Republic of Bangladesh"), &[]),
    c("BE", "BEL", "056", "Belgium", Some("Kingdom of Belgium"), &["België", "Belgique"]),
    c("BF", "BFA", "854", "Burkina Faso", None, &[]),
    c("BG", "BGR", "100", "Bulgaria", Some("Republic of Bulgaria"), &[]),
    c("BH", "BHR", "048", "Bahrain", Some("Kingdom of Bahrain"), &[]),
    c("BI", "BDI", "108", "Burundi", Some("Republic of Burundi"), &[]),
    c("BJ", "BEN", "204", "Benin", Some("Republic of Benin"), &[]),
    c("BL", "BLM", "652", "Saint Barthélemy", None, &["Saint Barthelemy"]),
    c("BM", "BMU", "060", "Bermuda", None, &[]),
    c("BN", "BRN", "096", "Brunei Darussalam", None, &["Brunei"]),
    c("BO", "BOL", "068", "Bolivia, Plurinational State of", Some("Plurinational State of Bolivia"), &["Bolivia"]),
    c("BQ", "BES", "535", "Bonaire, Sint Eustatius and Saba", None, &[]),
    c("BR", "BRA", "076", "Brazil", Some("Federative Republic of Brazil"), &["Brasil"]),
    c("BS", "BHS", "044", "Bahamas", Some("Commonwealth of the Bahamas"), &["The Bahamas"]),
    c("BT", "BTN", "064", "Bhutan", Some("Kingdom of Bhutan"), &[]),
    c("BV", "BVT", "074", "Bouvet Island", None, &[]),
    c("BW", "BWA", "072", "Botswana", Some("Republic of Botswana"), &[]),
    c("BY", "BLR", "112", "Belarus", Some("Republic of Belarus"), &[]),
    c("BZ", "BLZ", "084", "Belize", None, &[]),
    c("CA", "CAN", "124", "Canada", None, &[]),
    c("CC", "CCK", "166", "Cocos (Keeling) Islands", None, &[]),
    c("CD", "COD", "180", "Congo, The Democratic Republic of the", Some("Democratic Republic of the Congo"), &["DRC", "DR Congo"]),
    c("CF", "CAF", "140", "Central African Republic", None, &[]),
    c("CG", "COG", "178", "Congo", Some("Republic of the Congo"), &[]),
    c("CH", "CHE", "756", "Switzerland", Some("Swiss Confederation"), &["Schweiz", "Suisse"]),
    c("CI", "CIV", "384", "Côte d'Ivoire", Some("Republic of Côte d'Ivoire"), &["Cote d'Ivoire", "Ivory Coast"]),
    c("CK", "COK", "184", "Cook Islands", None, &[]),
    c("CL", "CHL", "152", "Chile", Some("Republic of Chile"), &[]),
    c("CM", "CMR", "120", "Cameroon", Some("Republic of Cameroon"), &[]),
    c("CN", "CHN", "156", "China", Some("People's Republic of China"), &["PRC", "中国"]),
    c("CO", "COL", "170", "Colombia", Some("Republic of Colombia"), &[]),
    c("CR", "CRI", "188", "Costa Rica", Some("Republic of Costa Rica"), &[]),
    c("CU", "CUB", "192", "Cuba", Some("Republic of Cuba"), &[]),
    c("CV", "CPV", "132", "Cabo Verde", Some("Republic of Cabo Verde"), &["Cape Verde"]),
    c("CW", "CUW", "531", "Curaçao", None, &["Curacao"]),
    c("CX", "CXR", "162", "Christmas Island", None, &[]),
    c("CY", "CYP", "196", "Cyprus", Some("Republic of Cyprus"), &[]),
    c("CZ", "CZE", "203", "Czechia", Some("Czech Republic"), &[]),
    c("DE", "DEU", "276", "Germany", Some("Federal Republic of Germany"), &["Deutschland"]),
    c("DJ", "DJI", "262", "Djibouti", Some("Republic of Djibouti"), &[]),
    c("DK", "DNK", "208", "Denmark", Some("Kingdom of Denmark"), &["Danmark"]),
    c("DM", "DMA", "212", "Dominica", Some("Commonwealth of Dominica"), &[]),
    c("DO", "DOM", "214", "Dominican Republic", None, &[]),
    c("DZ", "DZA", "012", "Algeria", Some("People's Democratic Republic of Algeria"), &[]),
    c("EC", "ECU", "218", "Ecuador", Some("Republic of Ecuador"), &[]),
    c("EE", "EST", "233", "Estonia", Some("Republic of Estonia"), &[]),
    c("EG", "EGY", "818", "Egypt", Some("Arab Republic of Egypt"), &[]),
    c("EH", "ESH", "732", "Western Sahara", None, &[]),
    c("ER", "ERI", "232", "Eritrea", Some("the State of Eritrea"), &[]),
    c("ES", "ESP", "724", "Spain", Some("Kingdom of Spain"), &["España", "Espana"]),
    c("ET", "ETH", "231", "Ethiopia", Some("Federal Democratic Republic of Ethiopia"), &[]),
    c("FI", "FIN", "246", "Finland", Some("Republic of Finland"), &["Suomi"]),
    c("FJ", "FJI", "242", "Fiji", Some("Republic of Fiji"), &[]),
    c("FK", "FLK", "238", "Falkland Islands (Malvinas)", None, &["Falkland Islands"]),
    c("FM", "FSM", "583", "Micronesia, Federated States of", Some("Federated States of Micronesia"), &["Micronesia"]),
    c("FO", "FRO", "234", "Faroe Islands", None, &[]),
    c("FR", "FRA", "250", "France", Some("French Republic"), &[]),
    c("GA", "GAB", "266", "Gabon", Some("Gabonese Republic"), &[]),
    c("GB", "GBR", "826", "United Kingdom", Some("United Kingdom of Great Britain and Northern Ireland"), &["UK", "Great Britain", "Britain"]),
    c("GD", "GRD", "308", "Grenada", None, &[]),
    c("GE", "GEO", "268", "Georgia", None, &[]),
    c("GF", "GUF", "254", "French Guiana", None, &[]),
    c("GG", "GGY", "831", "Guernsey", None, &[]),
    c("GH", "GHA", "288", "Ghana", Some("Republic of Ghana"), &[]),
    c("GI", "GIB", "292", "Gibraltar", None, &[]),
    c("GL", "GRL", "304", "Greenland", None, &[]),
    c("GM", "GMB", "270", "Gambia", Some("Republic of the Gambia"), &["The Gambia"]),
    c("GN", "GIN", "324", "Guinea", Some("Republic of Guinea"), &[]),
    c("GP", "GLP", "312", "Guadeloupe", None, &[]),
    c("GQ", "GNQ", "226", "Equatorial Guinea", Some("Republic of Equatorial Guinea"), &[]),
    c("GR", "GRC", "300", "Greece", Some("Hellenic Republic"), &["Ελλάδα"]),
    c("GS", "SGS", "239", "South Georgia and the South Sandwich Islands", None, &[]),
    c("GT", "GTM", "320", "Guatemala", Some("Republic of Guatemala"), &[]),
    c("GU", "GUM", "316", "Guam", None, &[]),
    c("GW", "GNB", "624", "Guinea-Bissau", Some("Republic of Guinea-Bissau"), &[]),
    c("GY", "GUY", "328", "Guyana", Some("Republic of Guyana"), &[]),
    c("HK", "HKG", "344", "Hong Kong", Some("Hong Kong Special Administrative Region of China"), &[]),
    c("HM", "HMD", "334", "Heard Island and McDonald Islands", None, &[]),
    c("HN", "HND", "340", "Honduras", Some("Republic of Honduras"), &[]),
    c("HR", "HRV", "191", "Croatia", Some("Republic of Croatia"), &["Hrvatska"]),
    c("HT", "HTI", "332", "Haiti", Some("Republic of Haiti"), &[]),
    c("HU", "HUN", "348", "Hungary", None, &["Magyarország"]),
    c("ID", "IDN", "360", "Indonesia", Some("Republic of Indonesia"), &[]),
    c("IE", "IRL", "372", "Ireland", None, &[]),
    c("IL", "ISR", "376", "Israel", Some("State of Israel"), &[]),
    c("IM", "IMN", "833", "Isle of Man", None, &[]),
    c("IN", "IND", "356", "India", Some("Republic of India"), &[]),
    c("IO", "IOT", "086", "British Indian Ocean Territory", None, &[]),
    c("IQ", "IRQ", "368", "Iraq", Some("Republic of Iraq"), &[]),
    c("IR", "IRN", "364", "Iran, Islamic Republic of", Some("Islamic Republic of Iran"), &["Iran"]),
    c("IS", "ISL", "352", "Iceland", Some("Republic of Iceland"), &[]),
    c("IT", "ITA", "380", "Italy", Some("Italian Republic"), &["Italia"]),
    c("JE", "JEY", "832", "Jersey", None, &[]),
    c("JM", "JAM", "388", "Jamaica", None, &[]),
    c("JO", "JOR", "400", "Jordan", Some("Hashemite Kingdom of Jordan"), &[]),
    c("JP", "JPN", "392", "Japan", None, &["日本"]),
    c("KE", "KEN", "404", "Kenya", Some("Republic of Kenya"), &[]),
    c("KG", "KGZ", "417", "Kyrgyzstan", Some("Kyrgyz Republic"), &[]),
    c("KH", "KHM", "116", "Cambodia", Some("Kingdom of Cambodia"), &[]),
    c("KI", "KIR", "296", "Kiribati", Some("Republic of Kiribati"), &[]),
    c("KM", "COM", "174", "Comoros", Some("Union of the Comoros"), &[]),
    c("KN", "KNA", "659", "Saint Kitts and Nevis", None, &[]),
    c("KP", "PRK", "408", "Korea, Democratic People's Republic of", Some("Democratic People's Republic of Korea"), &["North Korea"]),
    c("KR", "KOR", "410", "Korea, Republic of", None, &["South Korea", "Korea", "대한민국"]),
    c("KW", "KWT", "414", "Kuwait", Some("State of Kuwait"), &[]),
    c("KY", "CYM", "136", "Cayman Islands", None, &[]),
    c("KZ", "KAZ", "398", "Kazakhstan", Some("Republic of Kazakhstan"), &[]),
    c("LA", "LAO", "418", "Lao People's Democratic Republic", None, &["Laos"]),
    c("LB", "LBN", "422", "Lebanon", Some("Lebanese Republic"), &[]),
    c("LC", "LCA", "662", "Saint Lucia", None, &[]),
    c("LI", "LIE", "438", "Liechtenstein", Some("Principality of Liechtenstein"), &[]),
    c("LK", "LKA", "144", "Sri Lanka", Some("Democratic Socialist Republic of Sri Lanka"), &[]),
    c("LR", "LBR", "430", "Liberia", Some("Republic of Liberia"), &[]),
    c("LS", "LSO", "426", "Lesotho", Some("Kingdom of Lesotho"), &[]),
    c("LT", "LTU", "440", "Lithuania", Some("Republic of Lithuania"), &[]),
    c("LU", "LUX", "442", "Luxembourg", Some("Grand Duchy of Luxembourg"), &[]),
    c("LV", "LVA", "428", "Latvia", Some("Republic of Latvia"), &[]),
    c("LY", "LBY", "434", "Libya", Some("State of Libya"), &[]),
    c("MA", "MAR", "504", "Morocco", Some("Kingdom of Morocco"), &["Maroc"]),
    c("MC", "MCO", "492", "Monaco", Some("Principality of Monaco"), &[]),
    c("MD", "MDA", "498", "Moldova, Republic of", Some("Republic of Moldova"), &["Moldova"]),
    c("ME", "MNE", "499", "Montenegro", None, &[]),
    c("MF", "MAF", "663", "Saint Martin (French part)", None, &[]),
    c("MG", "MDG", "450", "Madagascar", Some("Republic of Madagascar"), &[]),
    c("MH", "MHL", "584", "Marshall Islands", Some("Republic of the Marshall Islands"), &[]),
    c("MK", "MKD", "807", "North Macedonia", Some("Republic of North Macedonia"), &["Macedonia"]),
    c("ML", "MLI", "466", "Mali", Some("Republic of Mali"), &[]),
    c("MM", "MMR", "104", "Myanmar", Some("Republic of Myanmar"), &["Burma"]),
    c("MN", "MNG", "496", "Mongolia", None, &[]),
    c("MO", "MAC", "446", "Macao", Some("Macao Special Administrative Region of China"), &["Macau"]),
    c("MP", "MNP", "580", "Northern Mariana Islands", Some("Commonwealth of the Northern Mariana Islands"), &[]),
    c("MQ", "MTQ", "474", "Martinique", None, &[]),
    c("MR", "MRT", "478", "Mauritania", Some("Islamic Republic of Mauritania"), &[]),
    c("MS", "MSR", "500", "Montserrat", None, &[]),
    c("MT", "MLT", "470", "Malta", Some("Republic of Malta"), &[]),
    c("MU", "MUS", "480", "Mauritius", Some("Republic of Mauritius"), &[]),
    c("MV", "MDV", "462", "Maldives", Some("Republic of Maldives"), &[]),
    c("MW", "MWI", "454", "Malawi", Some("Republic of Malawi"), &[]),
    c("MX", "MEX", "484", "Mexico", Some("United Mexican States"), &["México"]),
    c("MY", "MYS", "458", "Malaysia", None, &[]),
    c("MZ", "MOZ", "508", "Mozambique", Some("Republic of Mozambique"), &[]),
    c("NA", "NAM", "516", "Namibia", Some("Republic of Namibia"), &[]),
    c("NC", "NCL", "540", "New Caledonia", None, &[]),
    c("NE", "NER", "562", "Niger", Some("Republic of the Niger"), &[]),
    c("NF", "NFK", "574", "Norfolk Island", None, &[]),
    c("NG", "NGA", "566", "Nigeria", Some("Federal Republic of Nigeria"), &[]),
    c("NI", "NIC", "558", "Nicaragua", Some("Republic of Nicaragua"), &[]),
    c("NL", "NLD", "528", "Netherlands", Some("Kingdom of the Netherlands"), &["The Netherlands", "Nederland", "Holland"]),
    c("NO", "NOR", "578", "Norway", Some("Kingdom of Norway"), &["Norge"]),
    c("NP", "NPL", "524", "Nepal", Some("Federal Democratic Republic of Nepal"), &[]),
    c("NR", "NRU", "520", "Nauru", Some("Republic of Nauru"), &[]),
    c("NU", "NIU", "570", "Niue", None, &[]),
    c("NZ", "NZL", "554", "New Zealand", None, &["Aotearoa"]),
    c("OM", "OMN", "512", "Oman", Some("Sultanate of Oman"), &[]),
    c("PA", "PAN", "591", "Panama", Some("Republic of Panama"), &[]),
    c("PE", "PER", "604", "Peru", Some("Republic of Peru"), &["Perú"]),
    c("PF", "PYF", "258", "French Polynesia", None, &[]),
    c("PG", "PNG", "598", "Papua New Guinea", Some("Independent State of Papua New Guinea"), &[]),
    c("PH", "PHL", "608", "Philippines", Some("Republic of the Philippines"), &[]),
    c("PK", "PAK", "586", "Pakistan", Some("Islamic Republic of Pakistan"), &[]),
    c("PL", "POL", "616", "Poland", Some("Republic of Poland"), &["Polska"]),
    c("PM", "SPM", "666", "Saint Pierre and Miquelon", None, &[]),
    c("PN", "PCN", "612", "Pitcairn", None, &[]),
    c("PR", "PRI", "630", "Puerto Rico", None, &[]),
    c("PS", "PSE", "275", "Palestine, State of", Some("the State of Palestine"), &["Palestine", "Palestinian Territory"]),
    c("PT", "PRT", "620", "Portugal", Some("Portuguese Republic"), &[]),
    c("PW", "PLW", "585", "Palau", Some("Republic of Palau"), &[]),
    c("PY", "PRY", "600", "Paraguay", Some("Republic of Paraguay"), &[]),
    c("QA", "QAT", "634", "Qatar", Some("State of Qatar"), &[]),
    c("RE", "REU", "638", "Réunion", None, &["Reunion"]),
    c("RO", "ROU", "642", "Romania", None, &["România"]),
    c("RS", "SRB", "688", "Serbia", Some("Republic of Serbia"), &[]),
    c("RU", "RUS", "643", "Russian Federation", None, &["Russia", "Россия"]),
    c("RW", "RWA", "646", "Rwanda", Some("Rwandese Republic"), &[]),
    c("SA", "SAU", "682", "Saudi Arabia", Some("Kingdom of Saudi Arabia"), &["KSA"]),
    c("SB", "SLB", "090", "Solomon Islands", None, &[]),
    c("SC", "SYC", "690", "Seychelles", Some("Republic of Seychelles"), &[]),
    c("SD", "SDN", "729", "Sudan", Some("Republic of the Sudan"), &[]),
    c("SE", "SWE", "752", "Sweden", Some("Kingdom of Sweden"), &["Sverige"]),
    c("SG", "SGP", "702", "Singapore", Some("Republic of Singapore"), &[]),
    c("SH", "SHN", "654", "Saint Helena, Ascension and Tristan da Cunha", None, &["Saint Helena"]),
    c("SI", "SVN", "705", "Slovenia", Some("Republic of Slovenia"), &[]),
    c("SJ", "SJM", "744", "Svalbard and Jan Mayen", None, &[]),
    c("SK", "SVK", "703", "Slovakia", Some("Slovak Republic"), &[]),
    c("SL", "SLE", "694", "Sierra Leone", Some("Republic of Sierra Leone"), &[]),
    c("SM", "SMR", "674", "San Marino", Some("Republic of San Marino"), &[]),
    c("SN", "SEN", "686", "Senegal", Some("Republic of Senegal"), &[]),
    c("SO", "SOM", "706", "Somalia", Some("Federal Republic of Somalia"), &[]),
    c("SR", "SUR", "740", "Suriname", Some("Republic of Suriname"), &[]),
    c("SS", "SSD", "728", "South Sudan", Some("Republic of South Sudan"), &[]),
    c("ST", "STP", "678", "Sao Tome and Principe", Some("Democratic Republic of Sao Tome and Principe"), &[]),
    c("SV", "SLV", "222", "El Salvador", Some("Republic of El Salvador"), &[]),
    c("SX", "SXM", "534", "Sint Maarten (Dutch part)", None, &["Sint Maarten"]),
    c("SY", "SYR", "760", "Syrian Arab Republic", None, &["Syria"]),
    c("SZ", "SWZ", "748", "Eswatini", Some("Kingdom of Eswatini"), &["Swaziland"]),
    c("TC", "TCA", "796", "Turks and Caicos Islands", None, &[]),
    c("TD", "TCD", "148", "Chad", Some("Republic of Chad"), &[]),
    c("TF", "ATF", "260", "French Southern Territories", None, &[]),
    c("TG", "TGO", "768", "Togo", Some("Togolese Republic"), &[]),
    c("TH", "THA", "764", "Thailand", Some("Kingdom of Thailand"), &[]),
    c("TJ", "TJK", "762", "Tajikistan", Some("Republic of Tajikistan"), &[]),
    c("TK", "TKL", "772", "Tokelau", None, &[]),
    c("TL", "TLS", "626", "Timor-Leste", Some("Democratic Republic of Timor-Leste"), &["East Timor"]),
    c("TM", "TKM", "795", "Turkmenistan", None, &[]),
    c("TN", "TUN", "788", "Tunisia", Some("Republic of Tunisia"), &[]),
    c("TO", "TON", "776", "Tonga", Some("Kingdom of Tonga"), &[]),
    c("TR", "TUR", "792", "Türkiye", Some("Republic of Türkiye"), &["Turkey", "Turkiye"]),
    c("TT", "TTO", "780", "Trinidad and Tobago", Some("Republic of Trinidad and Tobago"), &[]),
    c("TV", "TUV", "798", "Tuvalu", None, &[]),
    c("TW", "TWN", "158", "Taiwan, Province of China", None, &["Taiwan"]),
    c("TZ", "TZA", "834", "Tanzania, United Republic of", Some("United Republic of Tanzania"), &["Tanzania"]),
    c("UA", "UKR", "804", "Ukraine", None, &["Україна"]),
    c("UG", "UGA", "800", "Uganda", Some("Republic of Uganda"), &[]),
    c("UM", "UMI", "581", "United States Minor Outlying Islands", None, &[]),
    c("US", "USA", "840", "United States", Some("United States of America"), &["U.S.", "U.S.A."]),
    c("UY", "URY", "858", "Uruguay", Some("Eastern Republic of Uruguay"), &[]),
    c("UZ", "UZB", "860", "Uzbekistan", Some("Republic of Uzbekistan"), &[]),
    c("VA", "VAT", "336", "Holy See (Vatican City State)", None, &["Vatican City", "Vatican"]),
    c("VC", "VCT", "670", "Saint Vincent and the Grenadines", None, &[]),
    c("VE", "VEN", "862", "Venezuela, Bolivarian Republic of", Some("Bolivarian Republic of Venezuela"), &["Venezuela"]),
    c("VG", "VGB", "092", "Virgin Islands, British", Some("British Virgin Islands"), &[]),
    c("VI", "VIR", "850", "Virgin Islands, U.S.", Some("Virgin Islands of the United States"), &[]),
    c("VN", "VNM", "704", "Viet Nam", Some("Socialist Republic of Viet Nam"), &["Vietnam"]),
    c("VU", "VUT", "548", "Vanuatu", Some("Republic of Vanuatu"), &[]),
    c("WF", "WLF", "876", "Wallis and Futuna", None, &[]),
    c("WS", "WSM", "882", "Samoa", Some("Independent State of Samoa"), &[]),
    c("YE", "YEM", "887", "Yemen", Some("Republic of Yemen"), &[]),
    c("YT", "MYT", "175", "Mayotte", None, &[]),
    c("ZA", "ZAF", "710", "South Africa", Some("Republic of South Africa"), &[]),
    c("ZM", "ZMB", "894", "Zambia", Some("Republic of Zambia"), &[]),
    c("ZW", "ZWE", "716", "Zimbabwe", Some("Republic of Zimbabwe"), &[]),
];

/// Folded name → index into `COUNTRIES`. Covers name, official name and aliases.
static NAME_INDEX: LazyLock<HashMap<String, usize>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (i, country) in COUNTRIES.iter().enumerate() {
        let names = std::iter::once(country.name)
            .chain(country.official)
            .chain(country.aliases.iter().copied());
        for name in names {
            index.entry(normalize(name)).or_insert(i);
        }
    }
    index
});

// ─── Lookup ─────────────────────────────────────────────────────

/// Fold free text into a lookup key: lowercase, single spaces, no surrounding whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Every entry of the reference set, ordered by alpha-2 code.
pub fn all() -> &'static [Country] {
    COUNTRIES
}

/// Find a country by its alpha-2 code (case-insensitive).
pub fn by_alpha2(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.alpha2.eq_ignore_ascii_case(code))
}

/// Canonical English name for an alpha-2 code.
pub fn canonical_name(alpha2: &str) -> Option<&'static str> {
    by_alpha2(alpha2).map(|c| c.name)
}

/// Structured lookup of a free-text candidate.
///
/// Returns `None` on a miss; a miss is never an error at this stage.
pub fn lookup(text: &str) -> Option<&'static Country> {
    let key = normalize(text);
    if key.is_empty() {
        return None;
    }

    let by_code = match key.len() {
        2 => COUNTRIES.iter().find(|c| c.alpha2.eq_ignore_ascii_case(&key)),
        3 if key.bytes().all(|b| b.is_ascii_digit()) => {
            COUNTRIES.iter().find(|c| c.numeric == key)
        }
        3 => COUNTRIES.iter().find(|c| c.alpha3.eq_ignore_ascii_case(&key)),
        _ => None,
    };
    if by_code.is_some() {
        return by_code;
    }

    if let Some(&i) = NAME_INDEX.get(&key) {
        return Some(&COUNTRIES[i]);
    }

    near_match(&key)
}

/// Single-typo match against names long enough to make that safe.
/// Two equally close countries means no match.
fn near_match(key: &str) -> Option<&'static Country> {
    if key.chars().count() < NEAR_MATCH_MIN_LEN {
        return None;
    }

    let mut hit: Option<usize> = None;
    for (name, &i) in NAME_INDEX.iter() {
        if name.chars().count() < NEAR_MATCH_MIN_LEN || edit_distance(key, name) > 1 {
            continue;
        }
        match hit {
            None => hit = Some(i),
            Some(prev) if prev == i => {}
            Some(_) => return None,
        }
    }

    hit.map(|i| &COUNTRIES[i])
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m.abs_diff(n) > 1 {
        return m.abs_diff(n);
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let alpha2: HashSet<_> = COUNTRIES.iter().map(|c| c.alpha2).collect();
        let alpha3: HashSet<_> = COUNTRIES.iter().map(|c| c.alpha3).collect();
        let numeric: HashSet<_> = COUNTRIES.iter().map(|c| c.numeric).collect();
        assert_eq!(alpha2.len(), COUNTRIES.len());
        assert_eq!(alpha3.len(), COUNTRIES.len());
        assert_eq!(numeric.len(), COUNTRIES.len());
        assert_eq!(COUNTRIES.len(), 249);
    }

    #[test]
    fn test_table_sorted_by_alpha2() {
        assert!(COUNTRIES.windows(2).all(|w| w[0].alpha2 < w[1].alpha2));
    }

    #[test]
    fn test_lookup_name_case_insensitive() {
        for q in ["Germany", "germany", "GERMANY", "  germany "] {
            assert_eq!(lookup(q).unwrap().alpha2, "DE", "query {:?}", q);
        }
    }

    #[test]
    fn test_lookup_codes() {
        assert_eq!(lookup("DE").unwrap().name, "Germany");
        assert_eq!(lookup("deu").unwrap().name, "Germany");
        assert_eq!(lookup("276").unwrap().name, "Germany");
        assert_eq!(lookup("USA").unwrap().name, "United States");
    }

    #[test]
    fn test_lookup_official_and_alias() {
        assert_eq!(lookup("Federal Republic of Germany").unwrap().alpha2, "DE");
        assert_eq!(lookup("United States of America").unwrap().alpha2, "US");
        assert_eq!(lookup("UK").unwrap().name, "United Kingdom");
        assert_eq!(lookup("South Korea").unwrap().name, "Korea, Republic of");
        assert_eq!(lookup("Russia").unwrap().name, "Russian Federation");
        assert_eq!(lookup("Turkey").unwrap().alpha2, "TR");
    }

    #[test]
    fn test_lookup_collapses_inner_whitespace() {
        assert_eq!(lookup("New   Zealand").unwrap().alpha2, "NZ");
    }

    #[test]
    fn test_lookup_near_exact() {
        assert_eq!(lookup("Germny").unwrap().alpha2, "DE");
        assert_eq!(lookup("Swtzerland").unwrap().alpha2, "CH");
    }

    #[test]
    fn test_near_exact_ambiguous_is_miss() {
        // One edit away from both Gambia and Zambia.
        assert!(lookup("Bambia").is_none());
    }

    #[test]
    fn test_short_names_need_exact_match() {
        assert!(lookup("Irak").is_none());
        assert_eq!(lookup("Iraq").unwrap().alpha2, "IQ");
    }

    #[test]
    fn test_lookup_miss() {
        assert!(lookup("").is_none());
        assert!(lookup("   ").is_none());
        assert!(lookup("xyzzy123").is_none());
        assert!(lookup("Beijing, China").is_none());
        assert!(lookup("🌍 Remote").is_none());
    }

    #[test]
    fn test_canonical_name_round_trip() {
        assert_eq!(canonical_name("de"), Some("Germany"));
        assert_eq!(canonical_name("ZZ"), None);
        assert_eq!(by_alpha2(" gb ").unwrap().alpha3, "GBR");
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("germany", "germny"), 1);
        assert_eq!(edit_distance("gambia", "zambia"), 1);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert!(edit_distance("abc", "abcdef") > 1);
    }
}
