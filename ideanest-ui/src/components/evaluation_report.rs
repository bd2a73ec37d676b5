use ideanest_app::domain::{
    Competitor, EvaluationRecord, MarketStrategy, PitchDeck, RefinedVersion, Scores,
};
use leptos::prelude::*;

/// Full report for one evaluation. Optional sections are only rendered when
/// the model produced them.
#[component]
pub fn EvaluationReport(#[prop(into)] title: String, evaluation: EvaluationRecord) -> impl IntoView {
    let swot = evaluation.swot_analysis();
    let pci = evaluation.pros_cons_improvements();
    let refined = evaluation.refined_versions();
    let competitors = evaluation.competitors();
    let strategy = evaluation.market_strategy();
    let deck = evaluation.pitch_deck();

    view! {
        <article class="report">
            <h2 class="report__title">{title}</h2>
            <p class="report__pitch">{evaluation.pitch_summary().to_string()}</p>

            <ScoreCard scores=evaluation.scores()/>

            <TextSection heading="Problem" body=evaluation.problem_statement().to_string()/>
            <TextSection heading="Existing solutions" body=evaluation.existing_solutions().to_string()/>
            <TextSection heading="Proposed solution" body=evaluation.proposed_solution().to_string()/>
            <TextSection heading="Market potential" body=evaluation.market_potential().to_string()/>
            <TextSection heading="Business model" body=evaluation.business_model().to_string()/>

            <section class="report__section report__grid">
                <h3>"SWOT analysis"</h3>
                <ListBlock heading="Strengths" items=swot.strengths/>
                <ListBlock heading="Weaknesses" items=swot.weaknesses/>
                <ListBlock heading="Opportunities" items=swot.opportunities/>
                <ListBlock heading="Threats" items=swot.threats/>
            </section>

            <section class="report__section report__grid">
                <h3>"Pros, cons and improvements"</h3>
                <ListBlock heading="Pros" items=pci.pros/>
                <ListBlock heading="Cons" items=pci.cons/>
                <ListBlock heading="Improvements" items=pci.improvements/>
            </section>

            {(!refined.is_empty()).then(|| view! { <RefinedVersions versions=refined/> })}
            {(!competitors.is_empty()).then(|| view! { <Competitors competitors=competitors/> })}
            {strategy.map(|strategy| view! { <Strategy strategy=strategy/> })}
            {deck.map(|deck| view! { <Deck deck=deck/> })}
        </article>
    }
}

#[component]
fn ScoreCard(scores: Scores) -> impl IntoView {
    let rows = [
        ("Innovation", scores.innovation),
        ("Feasibility", scores.feasibility),
        ("Scalability", scores.scalability),
    ];

    view! {
        <section class="report__section scores">
            <h3>"Scores"</h3>
            <p class="scores__overall">{format!("{:.1}", scores.overall())} " / 10"</p>
            <ul class="scores__list">
                {rows.into_iter().map(|(name, value)| view! {
                    <li class="scores__item">
                        <span class="scores__name">{name}</span>
                        <meter min="0" max="10" value=value.to_string()></meter>
                        <span class="scores__value">{format!("{:.1}", value)}</span>
                    </li>
                }).collect::<Vec<_>>()}
            </ul>
        </section>
    }
}

#[component]
fn TextSection(heading: &'static str, body: String) -> impl IntoView {
    view! {
        <section class="report__section">
            <h3>{heading}</h3>
            <p>{body}</p>
        </section>
    }
}

#[component]
fn ListBlock(heading: &'static str, items: Vec<String>) -> impl IntoView {
    view! {
        <div class="report__list">
            <h4>{heading}</h4>
            <ul>
                {items.into_iter().map(|item| view! { <li>{item}</li> }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

#[component]
fn RefinedVersions(versions: Vec<RefinedVersion>) -> impl IntoView {
    view! {
        <section class="report__section">
            <h3>"Refined versions"</h3>
            {versions.into_iter().map(|version| view! {
                <div class="report__card">
                    <h4>{version.title}</h4>
                    <p>{version.description}</p>
                    <p class="report__why">{version.why_it_works}</p>
                </div>
            }).collect::<Vec<_>>()}
        </section>
    }
}

#[component]
fn Competitors(competitors: Vec<Competitor>) -> impl IntoView {
    view! {
        <section class="report__section">
            <h3>"Competitors"</h3>
            {competitors.into_iter().map(|competitor| view! {
                <div class="report__card">
                    <h4>{competitor.name}</h4>
                    <p>{competitor.description}</p>
                    {competitor.pricing.map(|pricing| view! { <p>"Pricing: " {pricing}</p> })}
                    {competitor.market_share.map(|share| view! { <p>"Market share: " {share}</p> })}
                    <ul>
                        {competitor.key_features.into_iter().map(|feature| view! { <li>{feature}</li> }).collect::<Vec<_>>()}
                    </ul>
                </div>
            }).collect::<Vec<_>>()}
        </section>
    }
}

#[component]
fn Strategy(strategy: MarketStrategy) -> impl IntoView {
    view! {
        <section class="report__section">
            <h3>"Market strategy"</h3>
            <h4>"Target audience"</h4>
            <p>{strategy.target_audience}</p>
            <h4>"Go to market"</h4>
            <p>{strategy.go_to_market}</p>
            <h4>"Revenue model"</h4>
            <p>{strategy.revenue_model}</p>
        </section>
    }
}

#[component]
fn Deck(deck: PitchDeck) -> impl IntoView {
    let slides = deck
        .slides()
        .into_iter()
        .filter(|(_, body)| !body.is_empty())
        .map(|(name, body)| (name, body.to_string()))
        .collect::<Vec<_>>();

    view! {
        <section class="report__section">
            <h3>"Pitch deck"</h3>
            <ol class="report__slides">
                {slides.into_iter().map(|(name, body)| view! {
                    <li><strong>{name}</strong> ": " {body}</li>
                }).collect::<Vec<_>>()}
            </ol>
        </section>
    }
}
