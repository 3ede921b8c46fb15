pub mod track_resource;
