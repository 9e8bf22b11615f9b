//! Hero section: particle backdrop, typewriter roles and calls to action.

use leptos::prelude::*;

use super::particle_field::ParticleBackground;
use super::typewriter::Typewriter;
use crate::config::{SiteConfig, SocialLink};

/// Element id of the hero section; the navbar pins itself while it is visible.
pub const HOME_ID: &str = "home";

/// Anchors for the hero's social row, labelled for screen readers.
fn social_links(links: Vec<SocialLink>) -> impl IntoView {
	links
		.into_iter()
		.map(|SocialLink { label, href }| {
			let aria_label = label.clone();
			view! {
				<a
					class="home-social"
					href=href
					aria-label=aria_label
					target="_blank"
					rel="noopener noreferrer"
				>
					{label}
				</a>
			}
		})
		.collect_view()
}

/// Full-height landing section.
#[component]
pub fn Home(
	/// Content rendered in the hero.
	config: SiteConfig,
) -> impl IntoView {
	let SiteConfig {
		name,
		greeting,
		tagline,
		roles,
		socials,
		resume_href,
		..
	} = config;

	let socials = social_links(socials);

	view! {
		<section id=HOME_ID class="home">
			<ParticleBackground />
			<div class="home-content">
				<div class="home-roles">
					<Typewriter roles=roles />
				</div>
				<h1 class="home-title">
					{greeting}
					<br />
					<span class="home-name">{name}</span>
				</h1>
				<p class="home-tagline">{tagline}</p>
				<div class="home-actions">
					<a class="home-cta" href="#projects">
						"View My Work"
					</a>
					{resume_href
						.map(|href| {
							view! {
								<a class="home-resume" href=href download="">
									"My Resume"
								</a>
							}
						})}
				</div>
				<div class="home-socials">{socials}</div>
			</div>
		</section>
	}
}
