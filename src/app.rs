mod achievements;
mod experience;
mod footer;
mod hero;
mod motion;
mod particles;
mod projects;

use achievements::Achievements;
use experience::WorkExperience;
use footer::Footer;
use hero::Hero;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};
use particles::ParticleCanvas;
use projects::Projects;

use crate::content::site_content;

const NOSCRIPT_STYLE: &str = concat!(
    ".hero-headline, .we-line, .we-card, .ac-heading, .ac-ach-card, .ac-cert-card ",
    "{ opacity: 1 !important; visibility: visible !important; transform: none !important; }",
);

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                // elements rendered hidden for their entrance stay visible without the runtime
                <noscript>
                    <style>{NOSCRIPT_STYLE}</style>
                </noscript>
                <MetaTags />
            </head>
            <body class="bg-neutral-950 text-neutral-100 antialiased overflow-x-hidden">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let person = &site_content().person;

    view! {
        <Title text=person.name.clone() />
        <Meta name="description" content=format!("{} - {}", person.name, person.role) />

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}

/// The whole portfolio, one section after another.
#[component]
fn HomePage() -> impl IntoView {
    let content = site_content();

    view! {
        <ParticleCanvas />
        <main class="relative z-10 flex flex-col w-full">
            <Hero person=&content.person skills=&content.skills />
            <Projects projects=&content.projects />
            <WorkExperience internships=&content.internships experience=&content.experience />
            <Achievements
                achievements=&content.achievements
                certifications=&content.certifications
            />
            <Footer person=&content.person />
        </main>
    }
}
