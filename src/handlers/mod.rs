// Media Gateway HTTP handlers
//
// This module contains the HTTP handlers of the gateway and the CORS policy
// wrapped around them.

pub mod form;
pub mod routes;

use actix_cors::Cors;
use actix_web::{http::Method, web};

// Re-export handlers for easier access
pub use self::routes::{
    conversion_result, conversion_status, gateway_status, submit_conversion, submit_subtitles,
    subtitles_result, subtitles_status,
};

/// How long browsers may cache a pre-flight answer, in seconds
const CORS_MAX_AGE: usize = 86400;

/// CORS policy: any origin, any header, the two methods the gateway serves
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods([Method::GET, Method::POST])
        .allow_any_header()
        .max_age(CORS_MAX_AGE)
}

/// Registers every gateway endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_conversion)
        .service(conversion_status)
        .service(conversion_result)
        .service(submit_subtitles)
        .service(subtitles_status)
        .service(subtitles_result)
        .service(gateway_status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{test, App, HttpResponse};

    async fn ping() -> HttpResponse {
        HttpResponse::Ok().body("pong")
    }

    #[actix_web::test]
    async fn preflight_is_answered_without_reaching_the_handler() {
        let app =
            test::init_service(App::new().wrap(cors()).route("/ping", web::post().to(ping))).await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, "http://localhost:8080"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_success());
        let headers = res.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("GET") && methods.contains("POST"));
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
        assert!(test::read_body(res).await.is_empty());
    }

    #[actix_web::test]
    async fn cross_origin_requests_get_allow_origin() {
        let app =
            test::init_service(App::new().wrap(cors()).route("/ping", web::post().to(ping))).await;

        let req = test::TestRequest::post()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://app.example.org"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.org"
        );
        assert_eq!(test::read_body(res).await, "pong");
    }
}
