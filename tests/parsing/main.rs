mod header;
mod layout;
mod samples;
