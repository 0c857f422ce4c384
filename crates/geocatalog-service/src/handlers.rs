//! Request handlers.
//!
//! Each handler validates its input, hands the store work to
//! [`AppState::run`] and wraps the result in a [`ServiceResponse`]. The
//! radius search and the dashboard listings answer with bare JSON arrays.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use geocatalog_lib::{
    CityId, CityListing, CityPlaces, NewPlace, Place, PlaceId, ProximityResult,
    State as CatalogState, StateId,
};
use geocatalog_service_shared::{
    from_json_rejection, from_query_rejection, record_candidates_scanned, record_nearby_query,
    record_nearby_results, record_place_inserted, AppState, CreateCityRequest, CreateStateRequest,
    NearbyParams, PlacesFilter, ProblemDetails, RequestId, ServiceResponse, Validate,
};

type ApiResult<T> = Result<ServiceResponse<T>, ProblemDetails>;
type ListResult<T> = Result<Json<Vec<T>>, ProblemDetails>;

#[derive(Debug, Clone, Serialize)]
pub struct StateCreated {
    pub estado_id: StateId,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateList {
    pub count: usize,
    pub states: Vec<CatalogState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityCreated {
    pub cidade_id: CityId,
    pub nome: String,
    pub estado_id: StateId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityList {
    pub count: usize,
    pub cities: Vec<CityListing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceCreated {
    pub id: PlaceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceList {
    pub count: usize,
    pub places: Vec<Place>,
}

fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
) -> Result<T, Box<ProblemDetails>> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Box::new(from_json_rejection(&rejection, request_id.as_str())))
}

fn query_params<T>(
    params: Result<Query<T>, QueryRejection>,
    request_id: &RequestId,
) -> Result<T, Box<ProblemDetails>> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| Box::new(from_query_rejection(&rejection, request_id.as_str())))
}

/// POST /api/v1/states, POST /estado
pub(crate) async fn create_state(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<CreateStateRequest>, JsonRejection>,
) -> ApiResult<StateCreated> {
    let request = json_body(payload, &request_id).map_err(|p| *p)?;
    request.validate(request_id.as_str()).map_err(|p| *p)?;

    let name = request.name.trim().to_string();
    let id = {
        let name = name.clone();
        state
            .run(
                request_id.as_str(),
                move |catalog| catalog.hierarchy().add_state(&name),
            )
            .await?
    };

    info!(request_id = %request_id, state_id = id, "state stored");
    Ok(ServiceResponse::new(StateCreated {
        estado_id: id,
        nome: name,
    }))
}

/// GET /api/v1/states
pub(crate) async fn list_states(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResult<StateList> {
    let states = state
        .run(
            request_id.as_str(),
            |catalog| catalog.hierarchy().list_states(),
        )
        .await?;

    Ok(ServiceResponse::new(StateList {
        count: states.len(),
        states,
    }))
}

/// POST /api/v1/cities, POST /cidade
pub(crate) async fn create_city(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<CreateCityRequest>, JsonRejection>,
) -> ApiResult<CityCreated> {
    let request = json_body(payload, &request_id).map_err(|p| *p)?;
    request.validate(request_id.as_str()).map_err(|p| *p)?;

    let name = request.name.trim().to_string();
    let state_id = request.state_id;
    let id = {
        let name = name.clone();
        state
            .run(
                request_id.as_str(),
                move |catalog| catalog.hierarchy().add_city(&name, state_id),
            )
            .await?
    };

    info!(request_id = %request_id, city_id = id, state_id, "city stored");
    Ok(ServiceResponse::created(CityCreated {
        cidade_id: id,
        nome: name,
        estado_id: state_id,
    }))
}

async fn fetch_cities(
    state: &AppState,
    request_id: &RequestId,
) -> Result<Vec<CityListing>, ProblemDetails> {
    state
        .run(
            request_id.as_str(),
            |catalog| catalog.hierarchy().list_cities(),
        )
        .await
}

/// GET /api/v1/cities
pub(crate) async fn list_cities(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResult<CityList> {
    let cities = fetch_cities(&state, &request_id).await?;

    Ok(ServiceResponse::new(CityList {
        count: cities.len(),
        cities,
    }))
}

/// GET /cidades
pub(crate) async fn dashboard_cities(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ListResult<CityListing> {
    fetch_cities(&state, &request_id).await.map(Json)
}

/// GET /api/v1/cities/{id}/places, GET /cidades/{id}/locais
pub(crate) async fn city_places(
    State(state): State<AppState>,
    request_id: RequestId,
    city_id: Result<Path<CityId>, PathRejection>,
) -> ApiResult<CityPlaces> {
    let Path(city_id) = city_id.map_err(|rejection| {
        ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
    })?;

    let found = state
        .run(
            request_id.as_str(),
            move |catalog| catalog.places_in_city(city_id),
        )
        .await?;

    Ok(ServiceResponse::new(found))
}

/// POST /api/v1/places, POST /local
pub(crate) async fn create_place(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<NewPlace>, JsonRejection>,
) -> ApiResult<PlaceCreated> {
    let place = json_body(payload, &request_id).map_err(|p| *p)?;
    place.validate(request_id.as_str()).map_err(|p| *p)?;

    let id = state
        .run(request_id.as_str(), move |catalog| catalog.add_place(place))
        .await?;

    record_place_inserted();
    info!(request_id = %request_id, place_id = %id, "place stored");
    Ok(ServiceResponse::created(PlaceCreated { id }))
}

async fn fetch_places(
    state: &AppState,
    request_id: &RequestId,
    filter: Result<Query<PlacesFilter>, QueryRejection>,
) -> Result<Vec<Place>, ProblemDetails> {
    let filter = query_params(filter, request_id).map_err(|p| *p)?;
    let city = filter.city.filter(|c| !c.is_empty());

    state
        .run(request_id.as_str(), move |catalog| match city {
            Some(city) => catalog.places().list_places_by_city(&city),
            None => catalog.places().list_all_places(),
        })
        .await
}

/// GET /api/v1/places
pub(crate) async fn list_places(
    State(state): State<AppState>,
    request_id: RequestId,
    filter: Result<Query<PlacesFilter>, QueryRejection>,
) -> ApiResult<PlaceList> {
    let places = fetch_places(&state, &request_id, filter).await?;

    Ok(ServiceResponse::new(PlaceList {
        count: places.len(),
        places,
    }))
}

/// GET /locais
pub(crate) async fn dashboard_places(
    State(state): State<AppState>,
    request_id: RequestId,
    filter: Result<Query<PlacesFilter>, QueryRejection>,
) -> ListResult<Place> {
    fetch_places(&state, &request_id, filter).await.map(Json)
}

/// GET /api/v1/places/nearby, GET /locais/proximos
///
/// Answers with the matching places as a JSON array, nearest first.
pub(crate) async fn nearby_places(
    State(state): State<AppState>,
    request_id: RequestId,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> ListResult<ProximityResult> {
    let params = query_params(params, &request_id).map_err(|p| {
        record_nearby_query("invalid");
        *p
    })?;
    params.validate(request_id.as_str()).map_err(|p| {
        record_nearby_query("invalid");
        *p
    })?;

    let query = params.to_query();
    let search = state
        .run(request_id.as_str(), move |catalog| catalog.nearby(query))
        .await
        .inspect_err(|_| record_nearby_query("error"))?;

    record_nearby_query("ok");
    record_candidates_scanned(search.candidates_scanned);
    record_nearby_results(search.results.len());
    info!(
        request_id = %request_id,
        radius_km = query.radius_km,
        scanned = search.candidates_scanned,
        found = search.results.len(),
        "nearby search completed"
    );

    Ok(Json(search.results))
}
