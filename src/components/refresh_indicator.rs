use yew::prelude::*;
use crate::hooks::UseCachedFetchHandle;
use crate::models::CacheStatus;

#[derive(Properties, PartialEq, Clone)]
pub struct RefreshIndicatorProps {
    pub cache: UseCachedFetchHandle,
}

/// Primera carga = skeleton; refresco en segundo plano = aviso discreto
#[function_component(RefreshIndicator)]
pub fn refresh_indicator(props: &RefreshIndicatorProps) -> Html {
    match props.cache.status {
        CacheStatus::FirstLoad => html! {
            <div class="refresh-indicator first-load">
                <span class="spinner"></span>
                <span>{"Cargando..."}</span>
            </div>
        },
        CacheStatus::BackgroundRefresh => html! {
            <div class="refresh-indicator background" title="Mostrando datos en cache">
                <span class="refresh-icon">{"🔄"}</span>
                <span>{"Actualizando…"}</span>
            </div>
        },
        CacheStatus::Fresh | CacheStatus::Empty => html! {},
    }
}
