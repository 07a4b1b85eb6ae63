mod gate;
mod issuance;
