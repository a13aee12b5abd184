pub mod games;
pub mod soap;

pub use games::SoapGameAdapter;
pub use soap::HttpSoapClient;
