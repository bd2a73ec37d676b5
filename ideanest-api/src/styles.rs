pub const CSS: &str = r#"
:root {
    --base: #faf4ed;
    --surface: #fffaf3;
    --overlay: #f2e9e1;
    --muted: #9893a5;
    --subtle: #797593;
    --text: #575279;
    --love: #b4637a;
    --gold: #ea9d34;
    --pine: #286983;
    --foam: #56949f;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
    line-height: 1.6;
}
a { color: var(--pine); }
.nav { padding: 1rem 1.5rem; border-bottom: 1px solid var(--overlay); }
.nav__brand { font-weight: 800; font-size: 1.2rem; color: var(--pine); text-decoration: none; }
.container { max-width: 860px; margin: 0 auto; padding: 1.5rem; }
.hero { text-align: center; padding: 3rem 0 2rem; }
.hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--pine); font-weight: 800; margin-bottom: 0.75rem; }
.hero__subtitle { color: var(--subtle); font-size: 1.1rem; max-width: 560px; margin: 0 auto; }
.page-title { color: var(--pine); margin: 1.5rem 0; }
.idea-form { display: flex; flex-direction: column; gap: 0.75rem; margin: 2rem 0; }
.idea-form__label { font-weight: 600; }
.idea-form__input, .idea-form__textarea {
    padding: 0.9rem 1.1rem; border: 2px solid var(--overlay); border-radius: 8px;
    background: var(--surface); color: var(--text); font: inherit;
}
.idea-form__input:focus, .idea-form__textarea:focus { outline: none; border-color: var(--pine); }
.idea-form__button {
    margin-top: 0.5rem; padding: 1rem 2rem; background: var(--pine); color: var(--base);
    border: none; border-radius: 8px; font-size: 1rem; font-weight: 600; cursor: pointer;
}
.idea-form__button:disabled { background: var(--muted); cursor: wait; }
.how-it-works { margin: 2rem 0; }
.how-it-works ol { margin-left: 1.5rem; }
.loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
.loading__spinner {
    width: 50px; height: 50px; border: 4px solid var(--overlay);
    border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
.report {
    background: var(--surface); border: 2px solid var(--overlay);
    border-radius: 12px; padding: 1.5rem; margin: 2rem 0;
}
.report__title { color: var(--pine); font-size: 1.5rem; }
.report__pitch { font-style: italic; color: var(--subtle); margin: 0.5rem 0 1rem; }
.report__section { padding: 1rem 0; border-top: 1px solid var(--overlay); }
.report__section h3 { color: var(--love); margin-bottom: 0.5rem; }
.report__grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; }
.report__grid h3 { grid-column: 1 / -1; }
.report__list ul, .report__card ul { margin-left: 1.25rem; }
.report__card { padding: 0.75rem 0; }
.report__why { color: var(--foam); }
.report__slides { margin-left: 1.25rem; }
.report__actions { display: flex; gap: 1rem; align-items: center; margin-top: 1rem; }
.report__delete { padding: 0.5rem 1rem; background: var(--love); color: var(--base); border: none; border-radius: 4px; cursor: pointer; }
.scores__overall { font-size: 2rem; font-weight: 800; color: var(--gold); }
.scores__list { list-style: none; }
.scores__item { display: grid; grid-template-columns: 8rem 1fr 3rem; gap: 0.75rem; align-items: center; }
.history { list-style: none; }
.history__item { display: flex; gap: 1rem; justify-content: space-between; padding: 0.75rem 0; border-bottom: 1px solid var(--overlay); }
.history__title { font-weight: 600; flex: 1; }
.history__date, .history__score { color: var(--subtle); }
.notice { padding: 1rem; background: var(--overlay); border-radius: 8px; margin: 2rem 0; }
.error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
.error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #8b3d4d; }
.error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--love); color: var(--base); border: none; border-radius: 4px; cursor: pointer; text-decoration: none; display: inline-block; }
"#;
