use leptos::{html, prelude::*};

use super::motion::{all, first, use_motion, MotionSpec};
use crate::content::{Achievement, Certification};
use crate::scenes::achievements::{self, AchievementTargets};

const MOTION: MotionSpec = MotionSpec {
    name: "achievements",
    groups: &[".ac-heading", ".ac-ach-card", ".ac-cert-card"],
    interactive: &[1, 2],
};

/// Cards after the first tuck this far under the one above.
const OVERLAP_PX: i32 = 28;

fn stack_style(index: usize, base_z: usize, first_paint: Option<String>) -> String {
    let margin = if index == 0 { 0 } else { -OVERLAP_PX };
    let stack = format!("margin-top: {margin}px; z-index: {}", base_z + index);
    match first_paint {
        Some(paint) => format!("{stack}; {paint}"),
        None => stack,
    }
}

#[component]
pub fn Achievements(
    achievements: &'static [Achievement],
    certifications: &'static [Certification],
) -> impl IntoView {
    let root = NodeRef::<html::Section>::new();
    let counts = [1, achievements.len(), certifications.len()];
    let paint = use_motion(MOTION, &counts, root, None, |groups, width| {
        achievements::scene(
            AchievementTargets {
                heading: first(groups, 0),
                achievements: all(groups, 1),
                certifications: all(groups, 2),
            },
            width,
        )
    });

    view! {
        <section
            node_ref=root
            class="w-full py-16 px-4 md:px-8 lg:px-20 text-white"
            aria-labelledby="ach-heading"
        >
            <div class="max-w-6xl mx-auto">
                <h2
                    id="ach-heading"
                    class="ac-heading text-3xl md:text-4xl font-extrabold mb-6"
                    style=paint.style(0, 0)
                >
                    "Achievements & Certifications"
                </h2>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-10 [perspective:1000px]">
                    <div>
                        <h3 class="text-xl font-bold mb-4">"Achievements"</h3>
                        <div class="relative">
                            {achievements
                                .iter()
                                .enumerate()
                                .map(|(i, a)| {
                                    view! {
                                        <article
                                            class="ac-ach-card relative rounded-2xl border border-white/10 bg-white/5 backdrop-blur-md p-5 md:p-6 origin-top focus:outline-none focus:ring-2 focus:ring-purple-500/30"
                                            style=stack_style(i, 100, paint.style(1, i))
                                            tabindex="0"
                                        >
                                            <h4 class="text-base font-semibold text-white">{a.as_str()}</h4>
                                            <div class="text-xs text-slate-300">"Achievement"</div>
                                        </article>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                    <div>
                        <h3 class="text-xl font-bold mb-4">"Certifications"</h3>
                        <div class="relative">
                            {certifications
                                .iter()
                                .enumerate()
                                .map(|(i, c)| {
                                    view! {
                                        <article
                                            class="ac-cert-card relative rounded-2xl border border-white/10 bg-white/5 backdrop-blur-md p-5 md:p-6 origin-top focus:outline-none focus:ring-2 focus:ring-purple-500/30"
                                            style=stack_style(i, 200, paint.style(2, i))
                                            tabindex="0"
                                        >
                                            <div class="flex items-start justify-between gap-3">
                                                <div>
                                                    <h4 class="text-base font-semibold text-white">
                                                        {c.title.as_str()}
                                                    </h4>
                                                    {c
                                                        .issuer
                                                        .as_deref()
                                                        .map(|issuer| {
                                                            view! {
                                                                <div class="ac-issuer text-xs text-slate-300">{issuer}</div>
                                                            }
                                                        })}
                                                </div>
                                                <div class="text-xs text-slate-300">"Certificate"</div>
                                            </div>
                                        </article>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
