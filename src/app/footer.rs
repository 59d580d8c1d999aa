use chrono::{DateTime, Datelike};
use leptos::prelude::*;

use crate::content::PersonProfile;

/// Year the site was built, for the copyright line.
pub fn build_year() -> i32 {
    match DateTime::parse_from_rfc3339(env!("BUILD_TIME")) {
        Ok(dt) => dt.year(),
        Err(e) => {
            log::warn!("unreadable build time: {e}");
            chrono::Utc::now().year()
        }
    }
}

#[component]
pub fn Footer(person: &'static PersonProfile) -> impl IntoView {
    let mailto = format!("mailto:{}", person.email);
    let external = ["ArtStation", "LinkedIn", "GitHub"]
        .into_iter()
        .filter_map(|label| person.link(label).map(|url| (label, url)))
        .map(|(label, url)| {
            view! {
                <a
                    href=url
                    target="_blank"
                    rel="noreferrer"
                    class="inline-flex items-center gap-2 rounded-md px-3 py-2 bg-white/5 border border-white/10 text-sm text-slate-100 hover:brightness-105 transition"
                >
                    {label}
                </a>
            }
        })
        .collect_view();

    view! {
        <footer class="relative w-full py-10 px-6 md:px-12 lg:px-20 text-white border-t border-white/10">
            <div class="max-w-6xl mx-auto">
                <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-6">
                    <div class="flex items-center gap-4">
                        <div class="w-12 h-12 rounded-lg bg-gradient-to-br from-purple-500 to-purple-700 flex items-center justify-center font-bold">
                            {person.monogram()}
                        </div>
                        <div>
                            <div class="text-lg font-semibold text-white">{person.name.as_str()}</div>
                            <div class="mt-1 text-sm text-slate-300">{person.phone.as_str()}</div>
                        </div>
                    </div>
                    <div class="flex flex-wrap items-center gap-3">
                        <a
                            href=mailto
                            aria-label="Send email"
                            class="inline-flex items-center gap-2 rounded-md px-3 py-2 bg-white/5 border border-white/10 text-sm text-slate-100 hover:brightness-105 transition"
                        >
                            "Gmail"
                        </a>
                        {external}
                    </div>
                </div>
                <div class="mt-4 text-sm text-slate-400">
                    "© " {build_year()} " " {person.name.as_str()}
                </div>
            </div>
        </footer>
    }
}
