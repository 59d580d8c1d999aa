use leptos::{html, prelude::*};

use super::motion::{all, first, use_motion, FirstPaint, MotionSpec};
use crate::content::ExperienceEntry;
use crate::scenes::experience::{self, ExperienceTargets};

const MOTION: MotionSpec = MotionSpec {
    name: "experience",
    groups: &[".we-line", ".we-card"],
    interactive: &[1],
};

#[component]
pub fn WorkExperience(
    internships: &'static [ExperienceEntry],
    experience: &'static [ExperienceEntry],
) -> impl IntoView {
    let root = NodeRef::<html::Section>::new();
    let spacer = NodeRef::<html::Div>::new();
    let cards = internships.len() + experience.len();
    let paint = use_motion(MOTION, &[1, cards], root, Some(spacer), |groups, _| {
        experience::scene(&ExperienceTargets {
            line: first(groups, 0),
            cards: all(groups, 1),
        })
    });

    let line_style = paint.style(0, 0);
    let first_experience = internships.len();

    view! {
        <div node_ref=spacer id="experience">
            <section
                node_ref=root
                class="relative w-full text-white py-16 px-6 md:px-12 lg:px-20"
                aria-labelledby="work-heading"
            >
                <div class="max-w-6xl mx-auto">
                    <h2 id="work-heading" class="text-3xl md:text-4xl font-extrabold">
                        "Internship & Experience"
                    </h2>
                    <div class="relative mt-12">
                        <div class="absolute left-6 top-6 bottom-6 hidden md:block" aria-hidden="true">
                            <div class="relative h-full w-0">
                                <div style=line_style class="we-line absolute left-1/2 -ml-0.5 h-full w-1 bg-gradient-to-b from-purple-400 to-purple-600 origin-top" />
                                <div class="absolute left-1/2 -ml-2.5 -top-3 w-5 h-5 rounded-full bg-purple-400 shadow-lg" />
                            </div>
                        </div>
                        <div class="md:pl-20">
                            <ExperienceGroup
                                title="Internships"
                                entries=internships
                                default_tag="Internship"
                                paint=paint.clone()
                                first_card=0
                            />
                            <div class="mt-12">
                                <ExperienceGroup
                                    title="Experience"
                                    entries=experience
                                    default_tag="Project"
                                    paint
                                    first_card=first_experience
                                />
                            </div>
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}

#[component]
fn ExperienceGroup(
    title: &'static str,
    entries: &'static [ExperienceEntry],
    default_tag: &'static str,
    paint: FirstPaint,
    /// Position of this group's first card among all cards of the section
    first_card: usize,
) -> impl IntoView {
    view! {
        <div>
            <h3 class="text-xl font-bold">{title}</h3>
            <div class="mt-6 grid gap-6">
                {entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        let tag = entry.tag.as_deref().unwrap_or(default_tag);
                        view! {
                            <article
                                style=paint.style(1, first_card + i)
                                class="we-card relative bg-white/5 border border-white/10 backdrop-blur-sm rounded-2xl p-5 md:p-6 hover:shadow-2xl"
                                aria-label=format!("{} at {}", entry.role, entry.organization)
                            >
                                <div class="flex items-start justify-between gap-4">
                                    <div>
                                        <div class="flex items-center gap-3">
                                            <h4 class="text-lg font-semibold">{entry.role.as_str()}</h4>
                                            <span class="text-sm text-slate-300">
                                                {entry.organization.as_str()}
                                            </span>
                                        </div>
                                        <div class="mt-1 text-xs text-slate-400">{entry.when_where()}</div>
                                    </div>
                                    <span class="inline-block px-3 py-1 text-xs font-medium rounded-full bg-purple-700/20 text-purple-200 border border-purple-700/30">
                                        {tag}
                                    </span>
                                </div>
                                <ul class="mt-4 ml-4 list-disc text-sm text-slate-200 space-y-2">
                                    {entry.bullets.iter().map(|b| view! { <li>{b.as_str()}</li> }).collect_view()}
                                </ul>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
