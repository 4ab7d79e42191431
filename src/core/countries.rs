//! ISO 3166-1 alpha-2 country table.
//!
//! Used to resolve the buyer country (C) and the fiscal space (I1) of an
//! ATCUD record. The table is a sorted static slice, searched by code.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use super::error::LookupError;

/// Country metadata from the ISO 3166-1 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Country {
    /// Alpha-2 code, e.g. "PT".
    pub code: &'static str,
    /// English short name.
    pub name: &'static str,
}

impl Country {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Resolve an alpha-2 code (case-sensitive, upper case).
pub fn find_country(code: &str) -> Result<&'static Country, LookupError> {
    COUNTRIES
        .binary_search_by(|c| c.code.cmp(code))
        .map(|idx| &COUNTRIES[idx])
        .map_err(|_| LookupError { code: code.into() })
}

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code.
pub fn is_known_country_code(code: &str) -> bool {
    find_country(code).is_ok()
}

/// All countries, sorted by code.
pub fn countries() -> &'static [Country] {
    COUNTRIES
}

/// Fiscal space of the tax rates (I1).
///
/// SAF-T(PT) uses the ISO code of the country, with the two Portuguese
/// autonomous regions carrying their own rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxRegion {
    Country(&'static Country),
    /// PT-AC: Região Autónoma dos Açores.
    Azores,
    /// PT-MA: Região Autónoma da Madeira.
    Madeira,
}

impl TaxRegion {
    /// Resolve an I1 code. `"0"` (no rate applies) is handled by the caller.
    pub fn resolve(code: &str) -> Result<Self, LookupError> {
        match code {
            "PT-AC" => Ok(Self::Azores),
            "PT-MA" => Ok(Self::Madeira),
            _ => find_country(code).map(Self::Country),
        }
    }

    /// Wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Country(c) => c.code,
            Self::Azores => "PT-AC",
            Self::Madeira => "PT-MA",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Country(c) => c.name,
            Self::Azores => "Portugal (Azores)",
            Self::Madeira => "Portugal (Madeira)",
        }
    }
}

impl fmt::Display for TaxRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TaxRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TaxRegion", 2)?;
        s.serialize_field("code", self.code())?;
        s.serialize_field("name", self.name())?;
        s.end()
    }
}

/// Complete ISO 3166-1 alpha-2 table (249 entries).
/// Sorted for binary search.
static COUNTRIES: &[Country] = &[
    Country::new("AD", "Andorra"),
    Country::new("AE", "United Arab Emirates"),
    Country::new("AF", "Afghanistan"),
    Country::new("AG", "Antigua and Barbuda"),
    Country::new("AI", "Anguilla"),
    Country::new("AL", "Albania"),
    Country::new("AM", "Armenia"),
    Country::new("AO", "Angola"),
    Country::new("AQ", "Antarctica"),
    Country::new("AR", "Argentina"),
    Country::new("AS", "American Samoa"),
    Country::new("AT", "Austria"),
    Country::new("AU", "Australia"),
    Country::new("AW", "Aruba"),
    Country::new("AX", "Åland Islands"),
    Country::new("AZ", "Azerbaijan"),
    Country::new("BA", "Bosnia and Herzegovina"),
    Country::new("BB", "Barbados"),
    Country::new("BD", "Bangladesh"),
    Country::new("BE", "Belgium"),
    Country::new("BF", "Burkina Faso"),
    Country::new("BG", "Bulgaria"),
    Country::new("BH", "Bahrain"),
    Country::new("BI", "Burundi"),
    Country::new("BJ", "Benin"),
    Country::new("BL", "Saint Barthélemy"),
    Country::new("BM", "Bermuda"),
    Country::new("BN", "Brunei Darussalam"),
    Country::new("BO", "Bolivia"),
    Country::new("BQ", "Bonaire, Sint Eustatius and Saba"),
    Country::new("BR", "Brazil"),
    Country::new("BS", "Bahamas"),
    Country::new("BT", "Bhutan"),
    Country::new("BV", "Bouvet Island"),
    Country::new("BW", "Botswana"),
    Country::new("BY", "Belarus"),
    Country::new("BZ", "Belize"),
    Country::new("CA", "Canada"),
    Country::new("CC", "Cocos (Keeling) Islands"),
    Country::new("CD", "Congo, Democratic Republic of the"),
    Country::new("CF", "Central African Republic"),
    Country::new("CG", "Congo"),
    Country::new("CH", "Switzerland"),
    Country::new("CI", "Côte d'Ivoire"),
    Country::new("CK", "Cook Islands"),
    Country::new("CL", "Chile"),
    Country::new("CM", "Cameroon"),
    Country::new("CN", "China"),
    Country::new("CO", "Colombia"),
    Country::new("CR", "Costa Rica"),
    Country::new("CU", "Cuba"),
    Country::new("CV", "Cabo Verde"),
    Country::new("CW", "Curaçao"),
    Country::new("CX", "Christmas Island"),
    Country::new("CY", "Cyprus"),
    Country::new("CZ", "Czechia"),
    Country::new("DE", "Germany"),
    Country::new("DJ", "Djibouti"),
    Country::new("DK", "Denmark"),
    Country::new("DM", "Dominica"),
    Country::new("DO", "Dominican Republic"),
    Country::new("DZ", "Algeria"),
    Country::new("EC", "Ecuador"),
    Country::new("EE", "Estonia"),
    Country::new("EG", "Egypt"),
    Country::new("EH", "Western Sahara"),
    Country::new("ER", "Eritrea"),
    Country::new("ES", "Spain"),
    Country::new("ET", "Ethiopia"),
    Country::new("FI", "Finland"),
    Country::new("FJ", "Fiji"),
    Country::new("FK", "Falkland Islands (Malvinas)"),
    Country::new("FM", "Micronesia"),
    Country::new("FO", "Faroe Islands"),
    Country::new("FR", "France"),
    Country::new("GA", "Gabon"),
    Country::new("GB", "United Kingdom"),
    Country::new("GD", "Grenada"),
    Country::new("GE", "Georgia"),
    Country::new("GF", "French Guiana"),
    Country::new("GG", "Guernsey"),
    Country::new("GH", "Ghana"),
    Country::new("GI", "Gibraltar"),
    Country::new("GL", "Greenland"),
    Country::new("GM", "Gambia"),
    Country::new("GN", "Guinea"),
    Country::new("GP", "Guadeloupe"),
    Country::new("GQ", "Equatorial Guinea"),
    Country::new("GR", "Greece"),
    Country::new("GS", "South Georgia and the South Sandwich Islands"),
    Country::new("GT", "Guatemala"),
    Country::new("GU", "Guam"),
    Country::new("GW", "Guinea-Bissau"),
    Country::new("GY", "Guyana"),
    Country::new("HK", "Hong Kong"),
    Country::new("HM", "Heard Island and McDonald Islands"),
    Country::new("HN", "Honduras"),
    Country::new("HR", "Croatia"),
    Country::new("HT", "Haiti"),
    Country::new("HU", "Hungary"),
    Country::new("ID", "Indonesia"),
    Country::new("IE", "Ireland"),
    Country::new("IL", "Israel"),
    Country::new("IM", "Isle of Man"),
    Country::new("IN", "India"),
    Country::new("IO", "British Indian Ocean Territory"),
    Country::new("IQ", "Iraq"),
    Country::new("IR", "Iran"),
    Country::new("IS", "Iceland"),
    Country::new("IT", "Italy"),
    Country::new("JE", "Jersey"),
    Country::new("JM", "Jamaica"),
    Country::new("JO", "Jordan"),
    Country::new("JP", "Japan"),
    Country::new("KE", "Kenya"),
    Country::new("KG", "Kyrgyzstan"),
    Country::new("KH", "Cambodia"),
    Country::new("KI", "Kiribati"),
    Country::new("KM", "Comoros"),
    Country::new("KN", "Saint Kitts and Nevis"),
    Country::new("KP", "Korea, Democratic People's Republic of"),
    Country::new("KR", "Korea, Republic of"),
    Country::new("KW", "Kuwait"),
    Country::new("KY", "Cayman Islands"),
    Country::new("KZ", "Kazakhstan"),
    Country::new("LA", "Lao People's Democratic Republic"),
    Country::new("LB", "Lebanon"),
    Country::new("LC", "Saint Lucia"),
    Country::new("LI", "Liechtenstein"),
    Country::new("LK", "Sri Lanka"),
    Country::new("LR", "Liberia"),
    Country::new("LS", "Lesotho"),
    Country::new("LT", "Lithuania"),
    Country::new("LU", "Luxembourg"),
    Country::new("LV", "Latvia"),
    Country::new("LY", "Libya"),
    Country::new("MA", "Morocco"),
    Country::new("MC", "Monaco"),
    Country::new("MD", "Moldova"),
    Country::new("ME", "Montenegro"),
    Country::new("MF", "Saint Martin (French part)"),
    Country::new("MG", "Madagascar"),
    Country::new("MH", "Marshall Islands"),
    Country::new("MK", "North Macedonia"),
    Country::new("ML", "Mali"),
    Country::new("MM", "Myanmar"),
    Country::new("MN", "Mongolia"),
    Country::new("MO", "Macao"),
    Country::new("MP", "Northern Mariana Islands"),
    Country::new("MQ", "Martinique"),
    Country::new("MR", "Mauritania"),
    Country::new("MS", "Montserrat"),
    Country::new("MT", "Malta"),
    Country::new("MU", "Mauritius"),
    Country::new("MV", "Maldives"),
    Country::new("MW", "Malawi"),
    Country::new("MX", "Mexico"),
    Country::new("MY", "Malaysia"),
    Country::new("MZ", "Mozambique"),
    Country::new("NA", "Namibia"),
    Country::new("NC", "New Caledonia"),
    Country::new("NE", "Niger"),
    Country::new("NF", "Norfolk Island"),
    Country::new("NG", "Nigeria"),
    Country::new("NI", "Nicaragua"),
    Country::new("NL", "Netherlands"),
    Country::new("NO", "Norway"),
    Country::new("NP", "Nepal"),
    Country::new("NR", "Nauru"),
    Country::new("NU", "Niue"),
    Country::new("NZ", "New Zealand"),
    Country::new("OM", "Oman"),
    Country::new("PA", "Panama"),
    Country::new("PE", "Peru"),
    Country::new("PF", "French Polynesia"),
    Country::new("PG", "Papua New Guinea"),
    Country::new("PH", "Philippines"),
    Country::new("PK", "Pakistan"),
    Country::new("PL", "Poland"),
    Country::new("PM", "Saint Pierre and Miquelon"),
    Country::new("PN", "Pitcairn"),
    Country::new("PR", "Puerto Rico"),
    Country::new("PS", "Palestine, State of"),
    Country::new("PT", "Portugal"),
    Country::new("PW", "Palau"),
    Country::new("PY", "Paraguay"),
    Country::new("QA", "Qatar"),
    Country::new("RE", "Réunion"),
    Country::new("RO", "Romania"),
    Country::new("RS", "Serbia"),
    Country::new("RU", "Russian Federation"),
    Country::new("RW", "Rwanda"),
    Country::new("SA", "Saudi Arabia"),
    Country::new("SB", "Solomon Islands"),
    Country::new("SC", "Seychelles"),
    Country::new("SD", "Sudan"),
    Country::new("SE", "Sweden"),
    Country::new("SG", "Singapore"),
    Country::new("SH", "Saint Helena, Ascension and Tristan da Cunha"),
    Country::new("SI", "Slovenia"),
    Country::new("SJ", "Svalbard and Jan Mayen"),
    Country::new("SK", "Slovakia"),
    Country::new("SL", "Sierra Leone"),
    Country::new("SM", "San Marino"),
    Country::new("SN", "Senegal"),
    Country::new("SO", "Somalia"),
    Country::new("SR", "Suriname"),
    Country::new("SS", "South Sudan"),
    Country::new("ST", "Sao Tome and Principe"),
    Country::new("SV", "El Salvador"),
    Country::new("SX", "Sint Maarten (Dutch part)"),
    Country::new("SY", "Syrian Arab Republic"),
    Country::new("SZ", "Eswatini"),
    Country::new("TC", "Turks and Caicos Islands"),
    Country::new("TD", "Chad"),
    Country::new("TF", "French Southern Territories"),
    Country::new("TG", "Togo"),
    Country::new("TH", "Thailand"),
    Country::new("TJ", "Tajikistan"),
    Country::new("TK", "Tokelau"),
    Country::new("TL", "Timor-Leste"),
    Country::new("TM", "Turkmenistan"),
    Country::new("TN", "Tunisia"),
    Country::new("TO", "Tonga"),
    Country::new("TR", "Türkiye"),
    Country::new("TT", "Trinidad and Tobago"),
    Country::new("TV", "Tuvalu"),
    Country::new("TW", "Taiwan"),
    Country::new("TZ", "Tanzania"),
    Country::new("UA", "Ukraine"),
    Country::new("UG", "Uganda"),
    Country::new("UM", "United States Minor Outlying Islands"),
    Country::new("US", "United States of America"),
    Country::new("UY", "Uruguay"),
    Country::new("UZ", "Uzbekistan"),
    Country::new("VA", "Holy See"),
    Country::new("VC", "Saint Vincent and the Grenadines"),
    Country::new("VE", "Venezuela"),
    Country::new("VG", "Virgin Islands (British)"),
    Country::new("VI", "Virgin Islands (U.S.)"),
    Country::new("VN", "Viet Nam"),
    Country::new("VU", "Vanuatu"),
    Country::new("WF", "Wallis and Futuna"),
    Country::new("WS", "Samoa"),
    Country::new("YE", "Yemen"),
    Country::new("YT", "Mayotte"),
    Country::new("ZA", "South Africa"),
    Country::new("ZM", "Zambia"),
    Country::new("ZW", "Zimbabwe"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries() {
        assert_eq!(find_country("PT").unwrap().name, "Portugal");
        assert_eq!(find_country("ES").unwrap().name, "Spain");
        assert!(is_known_country_code("DE"));
        assert!(is_known_country_code("AX"));
        assert!(is_known_country_code("ZW"));
    }

    #[test]
    fn unknown_countries() {
        assert_eq!(
            find_country("ZY").unwrap_err(),
            LookupError { code: "ZY".into() }
        );
        assert!(!is_known_country_code(""));
        assert!(!is_known_country_code("PRT"));
        assert!(!is_known_country_code("pt"));
    }

    #[test]
    fn list_is_sorted() {
        for window in COUNTRIES.windows(2) {
            assert!(
                window[0].code < window[1].code,
                "country codes not sorted: {} >= {}",
                window[0].code,
                window[1].code
            );
        }
    }

    #[test]
    fn list_count() {
        assert_eq!(countries().len(), 249);
    }

    #[test]
    fn tax_regions() {
        assert_eq!(TaxRegion::resolve("PT-AC").unwrap(), TaxRegion::Azores);
        assert_eq!(TaxRegion::resolve("PT-MA").unwrap().code(), "PT-MA");
        let pt = TaxRegion::resolve("PT").unwrap();
        assert_eq!(pt.code(), "PT");
        assert_eq!(pt.name(), "Portugal");
        assert!(TaxRegion::resolve("PT-XX").is_err());
        assert!(TaxRegion::resolve("0").is_err());
    }
}
