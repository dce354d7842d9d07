use actix_web::web;

pub mod routes {
    pub mod lead;
}
mod service {
    pub(crate) mod lead;
}
mod dtos {
    pub(crate) mod lead;
}

pub fn mount_leads() -> actix_web::Scope {
    web::scope("/leads")
        .service(routes::lead::get_lead_stats)
        .service(routes::lead::post_lead)
        .service(routes::lead::get_leads)
        .service(routes::lead::put_lead)
        .service(routes::lead::delete_lead)
}
