//! Static site content supplied by the embedding page.
//!
//! The page ships a `<script type="application/json" id="site-config">` element
//! holding a [`SiteConfig`]. Every field has a default so partial documents are
//! accepted.

use serde::Deserialize;

/// Element id of the JSON script tag carrying the site configuration.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// A link rendered in the hero's social row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SocialLink {
	/// Accessible label, also used as the visible fallback text.
	pub label: String,
	/// Target URL.
	pub href: String,
}

/// A content section below the hero (about, testimonials, ...).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectionConfig {
	/// Anchor id, also used for the navbar link.
	pub id: String,
	/// Heading and navbar label.
	pub title: String,
	/// Body paragraph.
	pub body: String,
}

/// Complete static content for the page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// Owner name shown in the navbar and hero.
	pub name: String,
	/// Line shown above the name.
	pub greeting: String,
	/// Hero description.
	pub tagline: String,
	/// Roles cycled by the typewriter headline.
	pub roles: Vec<String>,
	/// Social links in the hero.
	pub socials: Vec<SocialLink>,
	/// Optional downloadable resume.
	pub resume_href: Option<String>,
	/// Target of the navbar contact button.
	pub contact_href: String,
	/// Sections rendered after the hero, in order.
	pub sections: Vec<SectionConfig>,
	/// Footer text.
	pub footer: String,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			name: "Portfolio".into(),
			greeting: "Hello, I'm".into(),
			tagline: String::new(),
			roles: vec![
				"Web Developer".into(),
				"Software Developer".into(),
				"Frontend Developer".into(),
			],
			socials: Vec::new(),
			resume_href: None,
			contact_href: "#contact".into(),
			sections: Vec::new(),
			footer: String::new(),
		}
	}
}

impl SiteConfig {
	/// Parse a configuration document.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
