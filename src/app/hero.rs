use leptos::{html, prelude::*};

use super::motion::{first, use_motion, MotionSpec};
use crate::content::PersonProfile;
use crate::scenes::hero::{self, HeroTargets};

const MOTION: MotionSpec = MotionSpec {
    name: "hero",
    groups: &[".hero-hint", ".hero-headline"],
    interactive: &[],
};

#[component]
pub fn Hero(person: &'static PersonProfile, skills: &'static [String]) -> impl IntoView {
    let root = NodeRef::<html::Section>::new();
    let spacer = NodeRef::<html::Div>::new();
    let paint = use_motion(MOTION, &[1, 1], root, Some(spacer), |groups, _| {
        hero::scene(&HeroTargets {
            hint: first(groups, 0),
            headline: first(groups, 1),
        })
    });

    view! {
        <div node_ref=spacer>
            <section
                node_ref=root
                class="w-full min-h-screen relative flex flex-col items-center justify-center overflow-hidden"
            >
                <div class="absolute bottom-12 left-1/2 -translate-x-1/2">
                    <div class="hero-hint" style=paint.style(0, 0)>
                        <p class="text-lg md:text-2xl font-medium text-white">"Scroll Down!"</p>
                    </div>
                </div>
                <div class="hero-headline text-center px-6" style=paint.style(1, 0)>
                    <h1 class="text-4xl xl:text-6xl font-bold text-white">
                        "Hi, I'm " {person.name.as_str()}
                    </h1>
                    <p class="mt-4 text-lg md:text-xl text-purple-200">
                        {person.role.as_str()} " • " {person.location.as_str()}
                    </p>
                    <SkillsMarquee skills />
                </div>
            </section>
        </div>
    }
}

/// Skills scrolling sideways forever. The list is rendered twice so the track
/// can loop at -50% without a seam.
#[component]
fn SkillsMarquee(skills: &'static [String]) -> impl IntoView {
    let chip = |skill: &'static String| {
        view! {
            <span class="shrink-0 px-4 py-1 rounded-full border border-purple-400/30 bg-white/5 text-sm text-purple-100">
                {skill.as_str()}
            </span>
        }
    };

    view! {
        <div class="mt-8 max-w-xl mx-auto overflow-hidden" aria-label="Skills">
            <div class="skills-track flex w-max gap-3">
                {skills.iter().map(chip).collect_view()}
                <div class="contents" aria-hidden="true">
                    {skills.iter().map(chip).collect_view()}
                </div>
            </div>
        </div>
    }
}
