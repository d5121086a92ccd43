//! Country resolution from free-text locations.
//!
//! Locations conventionally end with the country name (`"Portland, OR, United
//! States"`). Resolution is a suffix match against [`KNOWN_COUNTRIES`] in
//! order; the first match wins.

/// Returned when no known country name ends the location.
pub const UNKNOWN_COUNTRY: &str = "?";

/// Recognised country names, in match order.
///
/// No entry may be a suffix of a later entry, otherwise the later one could
/// never match (`"Sudan"` would shadow `"South Sudan"`). Compound names are
/// therefore listed first.
pub const KNOWN_COUNTRIES: &[&str] = &[
  "Democratic Republic of the Congo", "Republic of the Congo",
  "Papua New Guinea", "Equatorial Guinea", "Guinea-Bissau", "South Sudan",
  "Northern Ireland", "South Korea", "North Korea", "American Samoa",
  "British Virgin Islands", "U.S. Virgin Islands", "North Macedonia",
  "East Timor", "Northern Mariana Islands", "South Africa",
  "Central African Republic", "Dominican Republic", "Czech Republic",
  "New Zealand", "New Caledonia", "United States", "United Kingdom",
  "United Arab Emirates", "Saudi Arabia", "Sri Lanka", "Costa Rica",
  "Puerto Rico", "El Salvador", "Sierra Leone", "Ivory Coast", "Burkina Faso",
  "Cape Verde", "Isle of Man", "Hong Kong", "Faroe Islands", "Cayman Islands",
  "Bosnia and Herzegovina", "Trinidad and Tobago", "Antigua and Barbuda",
  "Saint Kitts and Nevis", "Saint Lucia", "Saint Vincent and the Grenadines",
  "San Marino", "Vatican City", "Sint Maarten", "Saint Martin",
  "French Polynesia", "Solomon Islands", "Marshall Islands", "Cook Islands",
  "Timor-Leste", "Afghanistan", "Albania", "Algeria", "Andorra", "Angola",
  "Anguilla", "Argentina", "Armenia", "Aruba", "Australia", "Austria",
  "Azerbaijan", "Bahamas", "Bahrain", "Bangladesh", "Barbados", "Belarus",
  "Belgium", "Belize", "Benin", "Bermuda", "Bhutan", "Bolivia", "Botswana",
  "Brazil", "Brunei", "Bulgaria", "Burundi", "Cambodia", "Cameroon", "Canada",
  "Chad", "Chile", "China", "Colombia", "Comoros", "Croatia", "Cuba",
  "Curaçao", "Cyprus", "Denmark", "Djibouti", "Dominica", "Ecuador", "Egypt",
  "England", "Eritrea", "Estonia", "Eswatini", "Ethiopia", "Fiji", "Finland",
  "France", "Gabon", "Gambia", "Georgia", "Germany", "Ghana", "Gibraltar",
  "Greece", "Greenland", "Grenada", "Guadeloupe", "Guam", "Guatemala",
  "Guernsey", "Guinea", "Guyana", "Haiti", "Honduras", "Hungary", "Iceland",
  "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy",
  "Jamaica", "Japan", "Jersey", "Jordan", "Kazakhstan", "Kenya", "Kiribati",
  "Kosovo", "Kuwait", "Kyrgyzstan", "Laos", "Latvia", "Lebanon", "Lesotho",
  "Liberia", "Libya", "Liechtenstein", "Lithuania", "Luxembourg", "Macau",
  "Madagascar", "Malawi", "Malaysia", "Maldives", "Mali", "Malta",
  "Martinique", "Mauritania", "Mauritius", "Mexico", "Micronesia", "Moldova",
  "Monaco", "Mongolia", "Montenegro", "Morocco", "Mozambique", "Myanmar",
  "Namibia", "Nauru", "Nepal", "Netherlands", "Nicaragua", "Niger", "Nigeria",
  "Norway", "Oman", "Pakistan", "Palau", "Palestine", "Panama", "Paraguay",
  "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Réunion", "Romania",
  "Russia", "Rwanda", "Samoa", "Scotland", "Senegal", "Serbia", "Seychelles",
  "Singapore", "Slovakia", "Slovenia", "Somalia", "Spain", "Sudan", "Suriname",
  "Sweden", "Switzerland", "Syria", "Taiwan", "Tajikistan", "Tanzania",
  "Thailand", "Togo", "Tonga", "Tunisia", "Turkey", "Turkmenistan", "Tuvalu",
  "Uganda", "Ukraine", "Uruguay", "Uzbekistan", "Vanuatu", "Venezuela",
  "Vietnam", "Wales", "Yemen", "Zambia", "Zimbabwe",];

/// Map `full_location` to a country name from [`KNOWN_COUNTRIES`], or
/// [`UNKNOWN_COUNTRY`].
pub fn resolve_country(full_location: &str) -> &'static str {
  let location = full_location.trim();
  KNOWN_COUNTRIES
    .iter()
    .copied()
    .find(|country| location.ends_with(country))
    .unwrap_or(UNKNOWN_COUNTRY)
}
