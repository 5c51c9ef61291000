use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::{Method, StatusCode, header};
use juniper::{
    DefaultScalarValue, Definition, InputValue, OperationType, SchemaType,
    http::{GraphQLBatchRequest, GraphQLRequest, graphiql::graphiql_source},
    parser::parse_document_source,
};
use std::{sync::Arc, time::Instant};

use crate::{api, prelude::*};
use super::{Context, Request, Response, log, response};


const API_PATH: &str = "/graphql";

/// This is the main HTTP entry point, called for each incoming request.
pub(super) async fn handle<B>(req: Request<B>, ctx: Arc<Context>) -> Response
where
    B: hyper::body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    log::req::log(&req);
    if ctx.config.log.log_http_headers {
        log::headers::log(&req);
    }

    let method = req.method().clone();
    let path = req.uri().path().trim_end_matches('/');

    match path {
        API_PATH if method == Method::POST => {
            let body = match read_body(req.into_body(), ctx.config.http.max_body_size).await {
                Ok(body) => body,
                Err(response) => return response,
            };
            match serde_json::from_slice::<GraphQLBatchRequest>(&body) {
                Ok(request) => execute_api(request, &ctx).await,
                Err(e) => {
                    debug!("Received invalid GraphQL request body: {e}");
                    response::bad_request(Some(&format!("invalid GraphQL request: {e}")))
                }
            }
        }

        // GET requests either carry a query in the query string or are from a
        // human wanting the interactive GraphQL API explorer/IDE. Mutations
        // are only accepted via POST.
        API_PATH if method == Method::GET || method == Method::HEAD => {
            match request_from_query_string(req.uri().query().unwrap_or("")) {
                Ok(Some(request)) if is_mutation(&request, &ctx.api_root.schema) => {
                    debug!("Rejecting mutation sent via {method}");
                    response::mutation_requires_post()
                }
                Ok(Some(request)) => execute_api(GraphQLBatchRequest::Single(request), &ctx).await,
                Ok(None) => response::html(graphiql_source(API_PATH, None)),
                Err(msg) => response::bad_request(Some(&msg)),
            }
        }

        API_PATH => response::method_not_allowed(),

        _ => {
            debug!("Responding with 404 to {:?} '{}'", method, path);
            response::not_found()
        }
    }
}

/// Reads the whole body, but at most `limit` bytes. Returns a ready-to-send
/// error response if that fails.
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, Response>
where
    B: hyper::body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            debug!("Request body exceeds limit of {limit} bytes");
            Err(response::payload_too_large())
        }
        Err(e) => {
            warn!("Failed to read request body: {e}");
            Err(response::bad_request(Some("failed to read request body")))
        }
    }
}

/// Extracts a GraphQL request from the query part of a URI. Returns
/// `Ok(None)` if there is no `query` parameter.
fn request_from_query_string(query_string: &str) -> Result<Option<GraphQLRequest>, String> {
    let mut query = None;
    let mut operation_name = None;
    let mut variables = None;
    for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
        match &*key {
            "query" => query = Some(value.into_owned()),
            "operationName" => operation_name = Some(value.into_owned()),
            "variables" => variables = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(query) = query else {
        return Ok(None);
    };
    let variables = variables
        .map(|v| serde_json::from_str::<InputValue>(&v))
        .transpose()
        .map_err(|e| format!("invalid 'variables' parameter: {e}"))?;

    Ok(Some(GraphQLRequest::new(query, operation_name, variables)))
}

/// Returns `true` if `request` selects a mutation operation. Documents that
/// fail to parse return `false`; the executor reports those errors.
fn is_mutation(request: &GraphQLRequest, schema: &SchemaType<'_, DefaultScalarValue>) -> bool {
    let Ok(document) = parse_document_source(&request.query, schema) else {
        return false;
    };

    document.iter()
        .filter_map(|definition| match definition {
            Definition::Operation(op) => Some(&op.item),
            Definition::Fragment(_) => None,
        })
        .find(|op| match request.operation_name() {
            Some(name) => op.name.as_ref().is_some_and(|n| n.item == name),
            None => true,
        })
        .is_some_and(|op| op.operation_type == OperationType::Mutation)
}

/// Executes the given API request and serializes the result as JSON.
async fn execute_api(request: GraphQLBatchRequest, ctx: &Context) -> Response {
    let before = Instant::now();

    let api_context = api::Context::new(Arc::clone(&ctx.store));
    let out = request.execute(&ctx.api_root, &api_context).await;

    let status = if out.is_ok() { StatusCode::OK } else { StatusCode::BAD_REQUEST };
    let body = match serde_json::to_vec(&out) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize GraphQL response: {e}");
            return response::internal_server_error();
        }
    };

    debug!("Finished {API_PATH} request in {:.2?}", before.elapsed());

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}
