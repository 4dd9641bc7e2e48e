//! Word lists for the entities that have no numeric shape

/// Nationalities, religions and political groups. Matched capitalised, with an
/// optional plural `s`.
pub const NRP_TERMS: &[&str] = &[
    // Nationalities
    "Afghan", "Albanian", "Algerian", "American", "Argentine", "Argentinian",
    "Armenian", "Australian", "Austrian", "Bangladeshi", "Belgian", "Bolivian",
    "Brazilian", "British", "Bulgarian", "Cambodian", "Cameroonian", "Canadian",
    "Chilean", "Chinese", "Colombian", "Congolese", "Croatian", "Cuban", "Czech",
    "Danish", "Dominican", "Dutch", "Ecuadorian", "Egyptian", "English",
    "Eritrean", "Estonian", "Ethiopian", "Filipino", "Finnish", "French",
    "Georgian", "German", "Ghanaian", "Greek", "Guatemalan", "Haitian",
    "Honduran", "Hungarian", "Icelandic", "Indian", "Indonesian", "Iranian",
    "Iraqi", "Irish", "Israeli", "Italian", "Jamaican", "Japanese", "Jordanian",
    "Kazakh", "Kenyan", "Korean", "Kurdish", "Lebanese", "Libyan", "Lithuanian",
    "Malaysian", "Mexican", "Moroccan", "Nepalese", "Nigerian", "Norwegian",
    "Pakistani", "Palestinian", "Peruvian", "Polish", "Portuguese", "Romanian",
    "Russian", "Rwandan", "Saudi", "Scottish", "Senegalese", "Serbian",
    "Singaporean", "Slovak", "Somali", "Spanish", "Sri Lankan", "Sudanese",
    "Swedish", "Swiss", "Syrian", "Taiwanese", "Thai", "Tunisian", "Turkish",
    "Ugandan", "Ukrainian", "Uruguayan", "Venezuelan", "Vietnamese", "Welsh",
    "Yemeni", "Zambian", "Zimbabwean",
    // Religions
    "Anglican", "Atheist", "Baptist", "Buddhist", "Catholic", "Christian",
    "Evangelical", "Hindu", "Jain", "Jewish", "Jew", "Lutheran", "Methodist",
    "Mormon", "Muslim", "Orthodox", "Pentecostal", "Presbyterian", "Protestant",
    "Quaker", "Shia", "Sikh", "Sunni", "Taoist", "Zoroastrian",
    // Political groups
    "Communist", "Conservative", "Democrat", "Green Party", "Labour",
    "Liberal", "Libertarian", "Marxist", "Republican", "Social Democrat",
    "Socialist", "Tory",
];

/// Countries, US states and large cities. Ambiguous everyday words (`Chad`,
/// `Nice`, `Reading`, `Mobile`) are left out.
pub const LOCATION_TERMS: &[&str] = &[
    // Countries
    "Afghanistan", "Albania", "Algeria", "Argentina", "Armenia", "Australia",
    "Austria", "Bangladesh", "Belgium", "Bolivia", "Brazil", "Bulgaria",
    "Cambodia", "Cameroon", "Canada", "Chile", "China", "Colombia", "Croatia",
    "Cuba", "Czech Republic", "Denmark", "Ecuador", "Egypt", "England",
    "Estonia", "Ethiopia", "Finland", "France", "Germany", "Ghana", "Greece",
    "Guatemala", "Haiti", "Honduras", "Hungary", "Iceland", "India",
    "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Jamaica",
    "Japan", "Kazakhstan", "Kenya", "Lebanon", "Libya", "Lithuania", "Malaysia",
    "Mexico", "Morocco", "Nepal", "Netherlands", "New Zealand", "Nigeria",
    "North Korea", "Norway", "Pakistan", "Peru", "Philippines", "Poland",
    "Portugal", "Romania", "Russia", "Rwanda", "Saudi Arabia", "Scotland",
    "Senegal", "Serbia", "Singapore", "Slovakia", "Somalia", "South Africa",
    "South Korea", "Spain", "Sri Lanka", "Sudan", "Sweden", "Switzerland",
    "Syria", "Taiwan", "Thailand", "Tunisia", "Turkey", "Uganda", "Ukraine",
    "United Kingdom", "United States", "United States of America", "Uruguay",
    "Venezuela", "Vietnam", "Wales", "Yemen", "Zambia", "Zimbabwe",
    // US states
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii", "Idaho",
    "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine",
    "Maryland", "Massachusetts", "Michigan", "Minnesota", "Mississippi",
    "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey",
    "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina",
    "South Dakota", "Tennessee", "Texas", "Utah", "Vermont", "Virginia",
    "Washington", "West Virginia", "Wisconsin", "Wyoming",
    // Cities
    "Amsterdam", "Athens", "Atlanta", "Austin", "Bangkok", "Barcelona",
    "Beijing", "Berlin", "Boston", "Brisbane", "Brussels", "Buenos Aires",
    "Cairo", "Chicago", "Copenhagen", "Dallas", "Delhi", "Denver", "Detroit",
    "Dubai", "Dublin", "Edinburgh", "Hong Kong", "Houston", "Istanbul",
    "Jakarta", "Johannesburg", "Karachi", "Kyiv", "Lagos", "Las Vegas", "Lima",
    "Lisbon", "London", "Los Angeles", "Madrid", "Manchester", "Manila",
    "Melbourne", "Miami", "Milan", "Montreal", "Moscow", "Mumbai", "Munich",
    "Nairobi", "New Delhi", "New York City", "Oslo", "Paris", "Perth",
    "Philadelphia", "Phoenix", "Prague", "Rome", "San Diego", "San Francisco",
    "San Jose", "Santiago", "Seattle", "Seoul", "Shanghai", "Stockholm",
    "Sydney", "Tokyo", "Toronto", "Vancouver", "Vienna", "Warsaw",
];

/// Street suffixes recognised after a house number and capitalised words.
pub const STREET_SUFFIXES: &[&str] = &[
    "Avenue", "Ave", "Boulevard", "Blvd", "Court", "Ct", "Drive", "Dr", "Highway",
    "Hwy", "Lane", "Ln", "Parkway", "Pkwy", "Place", "Pl", "Road", "Rd", "Square",
    "Sq", "Street", "St", "Terrace", "Way",
];

/// `\b(?:a|b|...)\b` over `terms`, longest first so multi-word entries win
/// over their prefixes.
pub fn alternation(terms: &[&str], plural: bool) -> String {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();

    let body = sorted
        .iter()
        .map(|term| regex::escape(term).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");

    if plural {
        format!(r"\b(?:{})s?\b", body)
    } else {
        format!(r"\b(?:{})\b", body)
    }
}

/// House number, one to three capitalised words, street suffix.
pub fn street_address_pattern() -> String {
    format!(
        r"\b\d{{1,5}}\s+(?:[A-Z][a-z]+\s+){{1,3}}(?:{})\b\.?",
        STREET_SUFFIXES.join("|")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_alternation_prefers_longer_terms() {
        let re = Regex::new(&alternation(LOCATION_TERMS, false)).unwrap();
        let m = re.find("Flying to New York City tomorrow").unwrap();
        assert_eq!(m.as_str(), "New York City");
    }

    #[test]
    fn test_alternation_plural() {
        let re = Regex::new(&alternation(NRP_TERMS, true)).unwrap();
        assert!(re.is_match("a meeting of Republicans"));
        assert!(!re.is_match("a meeting of republicans"));
        assert!(!re.is_match("Frenchman"));
    }

    #[test]
    fn test_street_address() {
        let re = Regex::new(&street_address_pattern()).unwrap();
        let m = re.find("Ship it to 221 Baker Street, please").unwrap();
        assert_eq!(m.as_str(), "221 Baker Street");
        assert!(!re.is_match("221 baker street"));
    }

    #[test]
    fn test_terms_are_not_placeholders() {
        for term in NRP_TERMS.iter().chain(LOCATION_TERMS) {
            assert!(
                term.chars().any(|c| c.is_lowercase()),
                "{} would collide with an upper-case placeholder",
                term
            );
        }
    }
}
