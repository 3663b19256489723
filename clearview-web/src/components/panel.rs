use clearview_core::{AccessibilityAction, ContrastTheme, FontAdjust, Locale};
use yew::prelude::*;

use crate::app::{PANEL_ROOT_ID, SharedController};
use crate::dom;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub active_theme: Option<ContrastTheme>,
    #[prop_or_default]
    pub images_hidden: bool,
    #[prop_or_default]
    pub locale: Locale,
    #[prop_or_else(default_standard_url)]
    pub standard_url: AttrValue,
    pub on_action: Callback<AccessibilityAction>,
}

fn emit_on_click(
    cb: &Callback<AccessibilityAction>,
    action: AccessibilityAction,
) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        cb.emit(action);
    })
}

fn default_standard_url() -> AttrValue {
    AttrValue::from(clearview_core::config::default_standard_url())
}

/// Control strip for the low-vision version. Every control carries the same
/// `data-accessibility-action` vocabulary as server-rendered markup.
#[function_component(AccessibilityPanel)]
pub fn accessibility_panel(p: &Props) -> Html {
    let msgs = p.locale.messages();

    let theme_buttons = ContrastTheme::ALL.iter().map(|&theme| {
        let active = p.active_theme == Some(theme);
        html! {
            <button
                type="button"
                class={classes!("contrast-btn", theme.class_name(), active.then_some("active"))}
                data-accessibility-action={theme.id()}
                data-contrast-style={theme.id()}
                data-clearview-bound={theme.id()}
                aria-pressed={if active { "true" } else { "false" }}
                title={msgs.theme_description(theme)}
                aria-label={msgs.theme_description(theme)}
                onclick={emit_on_click(&p.on_action, AccessibilityAction::SetContrast(theme))}
            >
                { "A" }
            </button>
        }
    });

    let font_button = |adjust: FontAdjust, label: &'static str, text: &'static str| {
        let action = AccessibilityAction::AdjustFont(adjust);
        html! {
            <button
                type="button"
                class="font-btn"
                data-accessibility-action={action.name()}
                data-clearview-bound={action.name()}
                aria-label={label}
                onclick={emit_on_click(&p.on_action, action)}
            >
                { text }
            </button>
        }
    };

    let toggle = AccessibilityAction::ToggleImages;
    let standard = AccessibilityAction::StandardVersion;

    html! {
        <section class="accessibility-controls" aria-label={msgs.panel_title}>
            <h2 class="sr-only">{ msgs.panel_title }</h2>
            <div class="controls-group" role="group">
                { for theme_buttons }
            </div>
            <div class="controls-group" role="group">
                { font_button(FontAdjust::Decrease, msgs.font_decrease, "A-") }
                { font_button(FontAdjust::Reset, msgs.font_reset_button, "A") }
                { font_button(FontAdjust::Increase, msgs.font_increase, "A+") }
            </div>
            <div class="controls-group" role="group">
                <button
                    type="button"
                    class={classes!("images-btn", p.images_hidden.then_some("active"))}
                    data-accessibility-action={toggle.name()}
                    data-clearview-bound={toggle.name()}
                    aria-pressed={if p.images_hidden { "true" } else { "false" }}
                    onclick={emit_on_click(&p.on_action, toggle)}
                >
                    { msgs.toggle_images }
                </button>
                <a
                    href={p.standard_url.clone()}
                    class="standard-link"
                    data-accessibility-action={standard.name()}
                    data-clearview-bound={standard.name()}
                    onclick={emit_on_click(&p.on_action, standard)}
                >
                    { msgs.standard_version }
                </a>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ConnectedProps {
    pub shared: SharedController,
}

/// [`AccessibilityPanel`] driving the page controller and re-reading its
/// preferences after every action.
#[function_component(ConnectedPanel)]
pub fn connected_panel(p: &ConnectedProps) -> Html {
    let prefs = use_state(|| p.shared.preferences());
    let on_action = {
        let shared = p.shared.clone();
        let prefs = prefs.clone();
        Callback::from(move |action: AccessibilityAction| {
            shared.dispatch(action);
            prefs.set(shared.preferences());
        })
    };
    html! {
        <AccessibilityPanel
            active_theme={prefs.contrast_theme}
            images_hidden={prefs.images_hidden}
            locale={p.shared.locale()}
            standard_url={AttrValue::from(p.shared.standard_url())}
            {on_action}
        />
    }
}

/// Render the panel into `#clearview-panel` when the page provides one.
pub fn mount(shared: &SharedController) {
    let Some(root) = dom::document().and_then(|doc| doc.get_element_by_id(PANEL_ROOT_ID))
    else {
        return;
    };
    yew::Renderer::<ConnectedPanel>::with_root_and_props(
        root,
        ConnectedProps {
            shared: shared.clone(),
        },
    )
    .render();
}
