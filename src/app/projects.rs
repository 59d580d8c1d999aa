use leptos::{html, prelude::*};

use super::motion::{all, first, use_motion, MotionSpec};
use crate::content::Project;
use crate::scenes::projects::{self, ProjectTargets};

const MOTION: MotionSpec = MotionSpec {
    name: "projects",
    groups: &[".pj-heading", ".project-card"],
    interactive: &[1],
};

#[component]
pub fn Projects(projects: &'static [Project]) -> impl IntoView {
    let root = NodeRef::<html::Section>::new();
    // every card's entry offset depends on the breakpoint, so nothing is
    // hidden before the runtime starts
    use_motion(MOTION, &[], root, None, |groups, width| {
        projects::scene(
            ProjectTargets {
                heading: first(groups, 0),
                cards: all(groups, 1),
            },
            width,
        )
    });

    view! {
        <section node_ref=root id="projects" class="relative py-12 px-4 md:px-8 lg:px-16">
            <div class="max-w-6xl mx-auto">
                <h2 class="pj-heading text-3xl md:text-4xl font-bold text-white">"Projects"</h2>
                <div class="mt-8 grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6 [perspective:1000px]">
                    {projects.iter().map(|project| view! { <ProjectCard project /> }).collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(project: &'static Project) -> impl IntoView {
    let meta = [project.date.as_deref(), project.tools.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" • ");

    view! {
        <article class="project-card relative overflow-hidden rounded-2xl border-2 border-purple-200 bg-white/80 backdrop-blur-sm shadow-lg p-6 will-change-transform">
            <div class="absolute -top-4 -left-4 w-40 h-40 rounded-full bg-gradient-to-tr from-purple-600 to-purple-300 opacity-10 pointer-events-none" />
            <header class="flex items-start justify-between">
                <div>
                    <h3 class="text-lg font-semibold text-gray-900">{project.title.as_str()}</h3>
                    <div class="mt-1 text-xs text-gray-500">{meta}</div>
                </div>
                <div class="ml-3">
                    <span class="inline-block px-3 py-1 text-xs font-medium rounded-full bg-purple-50 text-purple-700 border border-purple-100">
                        {project.status()}
                    </span>
                </div>
            </header>
            <p class="mt-4 text-sm text-gray-700 min-h-[68px]">
                {project.description.as_deref().unwrap_or_default()}
            </p>
            <footer class="mt-6 flex items-center justify-between">
                <a
                    href=project.link.as_str()
                    class="text-sm font-medium inline-flex items-center gap-2 text-purple-600 hover:underline"
                >
                    "View repo"
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" d="M13 7l5 5m0 0l-5 5m5-5H6" />
                    </svg>
                </a>
                <div class="w-10 h-10 rounded-md bg-gradient-to-br from-purple-50 to-purple-100 flex items-center justify-center text-purple-700 font-semibold text-sm">
                    {project.monogram()}
                </div>
            </footer>
        </article>
    }
}
