use actix_web::web;

pub mod routes {
    pub mod customer;
}
mod service {
    pub(crate) mod customer;
}
mod dtos {
    pub(crate) mod customer;
}

pub fn mount_customers() -> actix_web::Scope {
    web::scope("/customers")
        .service(routes::customer::post_customer)
        .service(routes::customer::get_customers)
        .service(routes::customer::get_customer)
        .service(routes::customer::put_customer)
        .service(routes::customer::delete_customer)
}
