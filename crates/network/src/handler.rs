mod command;
mod swarm;
