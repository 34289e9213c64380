// ============================================================================
// APP STATE CONTEXT - Compartir AppState (contenido + FetchRegistry)
// ============================================================================
// Un único registry por provider: todos los consumidores de una misma
// clave ven el mismo lastFetched.
// ============================================================================

use yew::prelude::*;
use crate::state::AppState;

#[derive(Properties, PartialEq)]
pub struct AppStateProviderProps {
    /// Estado a inyectar; por defecto uno nuevo (tests, previews)
    #[prop_or_default]
    pub state: Option<AppState>,
    pub children: Children,
}

#[function_component(AppStateProvider)]
pub fn app_state_provider(props: &AppStateProviderProps) -> Html {
    let initial = props.state.clone();
    let state = use_state(move || initial.unwrap_or_default());

    html! {
        <ContextProvider<AppState> context={(*state).clone()}>
            {props.children.clone()}
        </ContextProvider<AppState>>
    }
}
